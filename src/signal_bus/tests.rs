use super::{BusError, InMemoryBus, SignalBus, SignalValue, names};

#[test]
fn test_feed_then_get() {
    let bus = InMemoryBus::new();
    bus.feed(names::aircraft::FUEL_ON_BOARD_KG, SignalValue::Number(2650.0));
    assert_eq!(bus.get_f64(names::aircraft::FUEL_ON_BOARD_KG).unwrap(), 2650.0);
    assert_eq!(bus.set_count(names::aircraft::FUEL_ON_BOARD_KG), 0);
}

#[test]
fn test_set_counts_commands_only() {
    let bus = InMemoryBus::new();
    bus.set(names::ground::CALL_REFUEL, SignalValue::from(true)).unwrap();
    bus.set(names::ground::CALL_REFUEL, SignalValue::from(true)).unwrap();
    assert_eq!(bus.set_count(names::ground::CALL_REFUEL), 2);
    assert_eq!(bus.set_count(names::ground::CALL_BOARDING), 0);
}

#[test]
fn test_disconnect_fails_reads_and_status() {
    let bus = InMemoryBus::new();
    bus.feed(names::aircraft::BEACON_ON, SignalValue::from(true));
    bus.set_connected(false);
    assert_eq!(bus.status(names::aircraft::BEACON_ON), 0);
    assert_eq!(bus.get(names::aircraft::BEACON_ON), Err(BusError::Disconnected));
    bus.set_connected(true);
    assert!(bus.get_bool(names::aircraft::BEACON_ON).unwrap());
}

#[test]
fn test_unknown_variable() {
    let bus = InMemoryBus::new();
    assert!(matches!(
        bus.get("aircraft.no_such_var"),
        Err(BusError::UnknownVariable(_))
    ));
    bus.subscribe("aircraft.no_such_var");
    assert_eq!(bus.get_f64("aircraft.no_such_var").unwrap(), 0.0);
}

#[test]
fn test_value_coercions() {
    assert!(SignalValue::Number(1.0).as_bool());
    assert!(!SignalValue::Number(0.0).as_bool());
    assert_eq!(SignalValue::from("AB123").as_text(), "AB123");
    assert_eq!(SignalValue::from("AB123").as_f64(), 0.0);
}
