use num::Float;
use serde::Deserialize;

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
            Self::BoundedProd => ProductionLink::BoundedProd.apply(u, v),
            Self::DrasticProd => ProductionLink::DrasticProd.apply(u, v),
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.apply(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.apply(u, v),
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Implication operator method for shaping a rule's consequence by the
/// firing strength of its premise. `u` is the premise degree and `v` the
/// consequence membership.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Zadeh's arithmetic rule
    Ra,
    /// Zadeh's max-min rule
    Rm,
    /// Mamdani's min rule (clipping)
    #[default]
    Rc,
    /// Boolean implication
    Rb,
    /// Standard sequence
    Rs,
    /// Gödelian logic
    Rg,
    Rsg,
    Rgs,
    Rgg,
    Rss,
    /// Larsen's product rule (scaling)
    Prod,
}

impl ImplicationOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        let one = F::one();

        match self {
            Self::Ra => F::min(one, one - u + v),
            Self::Rm => F::max(F::min(u, v), one - u),
            Self::Rc => F::min(u, v),
            Self::Rb => F::max(one - u, v),
            Self::Rs => {
                if u <= v {
                    one
                } else {
                    F::zero()
                }
            },
            Self::Rg => {
                if u <= v {
                    one
                } else {
                    v
                }
            },
            Self::Rsg => F::min(Self::Rs.apply(u, v), Self::Rg.apply(one - u, one - v)),
            Self::Rgs => F::min(Self::Rg.apply(u, v), Self::Rs.apply(one - u, one - v)),
            Self::Rgg => F::min(Self::Rg.apply(u, v), Self::Rg.apply(one - u, one - v)),
            Self::Rss => F::min(Self::Rs.apply(u, v), Self::Rs.apply(one - u, one - v)),
            Self::Prod => u * v,
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of Gravity
    #[default]
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// `universe` must be sorted, as long as `membership` and hold at least two
    /// points, and `membership` must have a non-zero area. Otherwise the result
    /// is NaN.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> F {
        if universe.len() < 2 || universe.len() != membership.len() {
            return F::nan();
        }

        let two = F::one() + F::one();

        match self {
            Self::Cog => {
                let three = two + F::one();
                let mut den = F::zero();
                let mut num = F::zero();

                for (u, m) in universe.windows(2).zip(membership.windows(2)) {
                    let base = u[1] - u[0];
                    let area_rect = F::min(m[0], m[1]) * base;
                    let center_rect = u[0] + base / two;
                    let (area_tria, center_tria) = if m[1] == m[0] {
                        (F::zero(), F::zero())
                    } else if m[1] > m[0] {
                        (base * (m[1] - m[0]) / two, u[0] + two / three * base)
                    } else {
                        (base * (m[0] - m[1]) / two, u[0] + F::one() / three * base)
                    };

                    // Each segment contributes area * centroid
                    den = den + area_rect + area_tria;
                    num = num + area_rect * center_rect + area_tria * center_tria;
                }

                num / den
            },
            Self::Boa => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let total_area = areas.iter().fold(F::zero(), |acc, &a| acc + a);
                let target = total_area / two;
                let mut cum_area = F::zero();
                let mut i_area = 0;

                for (i, &area) in areas.iter().enumerate() {
                    cum_area = cum_area + area;
                    i_area = i;
                    if cum_area >= target {
                        break;
                    }
                }

                let coords = [
                    (cum_area - areas[i_area], universe[i_area]),
                    (cum_area, universe[i_area + 1]),
                ];

                interp(Some(target), &coords).pop().unwrap_or_else(F::nan)
            },
            Self::Mom | Self::Lom | Self::Som => {
                let maximum = membership.iter().copied().fold(F::neg_infinity(), F::max);
                let at_maximum = universe
                    .iter()
                    .copied()
                    .zip(membership.iter().copied())
                    .filter_map(|(u, m)| if m == maximum { Some(u) } else { None });

                match self {
                    Self::Lom => at_maximum.fold(F::neg_infinity(), F::max),
                    Self::Som => at_maximum.fold(F::infinity(), F::min),
                    _ => {
                        let (len, sum) = at_maximum.fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                        sum / len
                    },
                }
            },
        }
    }
}
