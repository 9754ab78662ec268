//! Capacitor model tests: the `[0, E_max]` invariant, saturation at both
//! ends, and the energy odometers.

use ehsim_core::power::Capacitor;

const EPSILON: f64 = 1e-12;

#[test]
fn starts_full() {
    let cap = Capacitor::new(470e-9, 7.5);
    assert!((cap.energy_stored() - 0.5 * 470e-9 * 7.5 * 7.5).abs() < EPSILON);
    assert!((cap.energy_stored() - cap.max_energy()).abs() < EPSILON);
    assert!(cap.is_full());
}

#[test]
fn consume_reduces_voltage() {
    let mut cap = Capacitor::new(2.0, 3.0); // 9 J
    let delivered = cap.consume(5.0);
    assert!((delivered - 5.0).abs() < EPSILON);
    assert!((cap.energy_stored() - 4.0).abs() < EPSILON);
    assert!((cap.voltage() - 2.0).abs() < EPSILON);
}

#[test]
fn consume_saturates_at_empty() {
    let mut cap = Capacitor::new(2.0, 3.0);
    let delivered = cap.consume(100.0);
    assert!((delivered - 9.0).abs() < EPSILON, "only stored energy flows");
    assert_eq!(cap.energy_stored(), 0.0);
    assert_eq!(cap.voltage(), 0.0);
    // Negative charge is impossible; a further draw delivers nothing.
    assert_eq!(cap.consume(1.0), 0.0);
}

#[test]
fn harvest_integrates_power() {
    let mut cap = Capacitor::new(2.0, 3.0);
    cap.consume(9.0);
    let absorbed = cap.harvest(0.5, 4.0);
    assert!((absorbed - 2.0).abs() < EPSILON);
    assert!((cap.energy_stored() - 2.0).abs() < EPSILON);
}

#[test]
fn charge_clamps_at_maximum() {
    let mut cap = Capacitor::new(2.0, 3.0);
    cap.consume(1.0);
    let absorbed = cap.charge(50.0);
    assert!((absorbed - 1.0).abs() < EPSILON, "excess energy spills");
    assert!((cap.energy_stored() - cap.max_energy()).abs() < EPSILON);
    assert!(cap.is_full());
}

#[test]
fn odometers_track_actual_flow() {
    let mut cap = Capacitor::new(2.0, 3.0);
    cap.consume(4.0);
    cap.charge(1.0);
    cap.consume(2.0);
    assert!((cap.energy_consumed() - 6.0).abs() < EPSILON);
    assert!((cap.energy_harvested() - 1.0).abs() < EPSILON);
}

#[test]
fn energy_stays_in_bounds() {
    let mut cap = Capacitor::new(1.0, 2.0);
    for i in 0..1000 {
        if i % 3 == 0 {
            cap.consume(0.7);
        } else {
            cap.harvest(0.4, 1.0);
        }
        assert!(cap.energy_stored() >= 0.0);
        assert!(cap.energy_stored() <= cap.max_energy() + 1e-12);
    }
}
