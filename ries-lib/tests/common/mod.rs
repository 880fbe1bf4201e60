#![allow(dead_code)]

use std::collections::BTreeMap;

use ries::{Element, Isotope, Parity, State};

pub const B10_AMU: f64 = 10.012_936_862;
pub const B11_AMU: f64 = 11.009_305_166;
pub const B10_ABUNDANCE: f64 = 0.199;
pub const B11_ABUNDANCE: f64 = 0.801;

pub const B11_GROUND: &str = "3/2-_1";

fn widths(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn excited(id: &str, two_j: u32, parity: Parity, energy: f64, pairs: &[(&str, f64)]) -> State {
    State::excited(id, two_j, parity, energy, widths(pairs)).unwrap()
}

/// Low-lying levels of boron-11.
pub fn b11() -> Isotope {
    let states = [
        excited("1/2-_1", 1, Parity::Negative, 2.124_693, &[(B11_GROUND, 0.117e-6)]),
        excited("5/2-_1", 5, Parity::Negative, 4.444_98, &[(B11_GROUND, 0.55e-6)]),
        excited(
            "3/2-_2",
            3,
            Parity::Negative,
            5.020_30,
            &[(B11_GROUND, 0.856 * 1.97e-6), ("1/2-_1", 0.144 * 1.97e-6)],
        ),
        excited(
            "7/2-_1",
            7,
            Parity::Negative,
            6.741_85,
            &[(B11_GROUND, 0.70 * 0.030e-6), ("5/2-_1", 0.30 * 0.030e-6)],
        ),
        excited(
            "1/2+_1",
            1,
            Parity::Positive,
            6.791_80,
            &[
                (B11_GROUND, 0.675 * 0.39e-6),
                ("1/2-_1", 0.285 * 0.39e-6),
                ("3/2-_2", 0.04 * 0.39e-6),
            ],
        ),
    ];
    Isotope::new(
        "11B",
        B11_AMU,
        State::ground(B11_GROUND, 3, Parity::Negative),
        states.into_iter().map(|s| (s.id().to_string(), s)).collect(),
    )
    .unwrap()
}

/// Boron-10 with a single level that has no ground-state width.
pub fn b10() -> Isotope {
    let state = excited("1+_1", 2, Parity::Positive, 0.718_380, &[("3+_1", 0.0)]);
    Isotope::new(
        "10B",
        B10_AMU,
        State::ground("3+_1", 6, Parity::Positive),
        BTreeMap::from([(state.id().to_string(), state)]),
    )
    .unwrap()
}

pub fn natural_boron() -> Element {
    Element::new(
        5,
        "B",
        BTreeMap::from([(10, b10()), (11, b11())]),
        BTreeMap::from([(10, B10_ABUNDANCE), (11, B11_ABUNDANCE)]),
        Some(2.37),
    )
    .unwrap()
}
