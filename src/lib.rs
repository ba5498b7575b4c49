//! Mamdani fuzzy inference.
//!
//! Membership functions ([`MembershipFunction`]) describe linguistic terms
//! over the universe of a [`LinguisticVariable`]. A [`Rules`] base relates
//! terms of input variables to terms of output variables, and [`Mamdani`]
//! evaluates it for a set of crisp [`Inputs`]. Whole systems can also be
//! described in TOML and loaded through [`SystemConfig`].

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub use config::{InferenceConfig, PremiseConfig, RuleConfig, Shape, SystemConfig, TermConfig, VariableConfig};
pub use dsl::Expr;
pub use error::{Error, Result};
pub use inference::{Mamdani, Surface};
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use math::{meshgrid, Matrix};
pub use membership::{trapmf, trimf, MembershipFunction};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use system::FuzzySystem;
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, Variable, VariableKey, Variables, MAX_UNIVERSE_LEN};
