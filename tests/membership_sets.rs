use fuzzy_control::{trapmf, trimf, Linspace, MembershipFunction, Variables};

fn universe(max: f64) -> Vec<f64> {
    Linspace::with_step(0., max, 1.).unwrap().collect()
}

#[test]
fn test_line_deviation_sets() {
    let x = universe(100.);
    let sets = [
        [0., 0., 25.],
        [0., 25., 50.],
        [25., 50., 75.],
        [50., 75., 100.],
        [75., 100., 100.],
    ];

    for params in sets {
        let y = trimf(&x, params).unwrap();

        assert_eq!(y.len(), 101);
        assert_eq!(y[params[1] as usize], 1.);
    }

    // Neighbouring sets cross at one half, forming a partition of unity
    let curves: Vec<Vec<f64>> = sets.iter().map(|p| trimf(&x, *p).unwrap()).collect();

    for i in 0..x.len() {
        let total: f64 = curves.iter().map(|c| c[i]).sum();

        assert!((total - 1.).abs() < 1e-12, "at {}: {total}", x[i]);
    }
}

#[test]
fn test_obstacle_distance_sets() {
    let x = universe(200.);
    let very_close = trapmf(&x, [0., 0., 20., 40.]).unwrap();
    let close = trapmf(&x, [20., 40., 60., 80.]).unwrap();
    let middle = trapmf(&x, [60., 80., 120., 140.]).unwrap();
    let far = trapmf(&x, [120., 160., 200., 200.]).unwrap();

    assert_eq!(very_close[0], 1.);
    assert_eq!(very_close[30], 0.5);
    assert_eq!(close[30], 0.5);
    assert_eq!(close[50], 1.);
    assert_eq!(middle[100], 1.);
    assert_eq!(far[140], 0.5);
    assert_eq!(far[200], 1.);
    assert!(x.iter().zip(&far).all(|(x, m)| *x > 120. || *m == 0.));
}

#[test]
fn test_triangle_versus_trapezoid() {
    let x = universe(100.);
    let tri = trimf(&x, [25., 50., 75.]).unwrap();
    let trap = trapmf(&x, [15., 35., 65., 85.]).unwrap();

    // The trapezoid dominates the triangle everywhere
    assert!(tri.iter().zip(&trap).all(|(t, z)| t <= z));
    assert_eq!(tri.iter().filter(|m| **m == 1.).count(), 1);
    assert_eq!(trap.iter().filter(|m| **m == 1.).count(), 31);
}

#[test]
fn test_distance_variable() {
    let mut vars = Variables::new();
    let key = vars
        .add_terms(
            "distance",
            0. ..=200.,
            [
                ("very close", MembershipFunction::triangular(0., 0., 10.).unwrap()),
                ("close", MembershipFunction::triangular(8., 15., 20.).unwrap()),
                ("middle", MembershipFunction::triangular(15., 25.5, 30.).unwrap()),
                ("far", MembershipFunction::triangular(25., 40.5, 50.).unwrap()),
                ("very far", MembershipFunction::trapezoidal(45., 60., 200., 200.).unwrap()),
            ],
            Some(0.5),
        )
        .unwrap();
    let distance = vars.get(key).unwrap();

    assert_eq!(distance.universe().len(), 401);
    assert_eq!(distance.membership(&"middle", 25.5), Some(1.));
    assert_eq!(distance.membership(&"very far", 200.), Some(1.));
    assert_eq!(distance.membership(&"very close", 5.), Some(0.5));

    let degrees = distance.fuzzify(47.5);
    let active: Vec<_> = degrees.iter().filter(|(_, m)| *m > 0.).map(|(t, _)| **t).collect();

    assert_eq!(active.len(), 2);
    assert!(active.contains(&"far") && active.contains(&"very far"));
}
