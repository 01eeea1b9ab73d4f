//! Bus-level delivery tests: ordering, absence, removal, fail-fast and identity.

use std::sync::{Arc, Mutex};

use eventvisor::{BusError, Event, EventBus, EventPriority, HandlerSet, Listener};
use rand::seq::SliceRandom;

#[derive(Debug)]
struct Ping;
impl Event for Ping {}

#[derive(Debug)]
struct Pong;
impl Event for Pong {}

type Log = Arc<Mutex<Vec<String>>>;

/// Error raised by `Faulty`, recognisable after it crosses `fire`.
#[derive(Debug, PartialEq, Eq)]
struct Refused(u32);

impl std::fmt::Display for Refused {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "refused #{}", self.0)
    }
}

impl std::error::Error for Refused {}

struct Early(Log);
struct Late(Log);
struct Faulty(Log);
struct Tail(Log);

impl Listener for Early {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 5, |me, _| {
            me.0.lock().unwrap().push("B".into());
            Ok(())
        });
    }
}

impl Listener for Late {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 10, |me, _| {
            me.0.lock().unwrap().push("A".into());
            Ok(())
        });
    }
}

impl Listener for Faulty {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 20, |me, _| {
            me.0.lock().unwrap().push("faulty".into());
            Err(Refused(7).into())
        });
    }
}

impl Listener for Tail {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 30, |me, _| {
            me.0.lock().unwrap().push("tail".into());
            Ok(())
        });
    }
}

/// One listener type per `N`; priority rises with `N`.
struct Ranked<const N: usize>(Log);

impl<const N: usize> Listener for Ranked<N> {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", N as i32 * 3 - 7, |me, _| {
            me.0.lock().unwrap().push(N.to_string());
            Ok(())
        });
    }
}

fn taken(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn scenario_ping_order_then_unregister() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    let a = Arc::new(Late(log.clone()));
    let b = Arc::new(Early(log.clone()));

    bus.register(&a).unwrap();
    bus.register(&b).unwrap();
    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["B", "A"]);

    bus.unregister(&b).unwrap();
    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["A"]);
}

#[test]
fn distinct_priorities_fire_ascending_regardless_of_registration_order() {
    let log: Log = Arc::default();

    for _ in 0..20 {
        let bus = EventBus::new();
        let mut regs: Vec<Box<dyn Fn(&EventBus)>> = vec![
            Box::new({
                let l = Arc::new(Ranked::<0>(log.clone()));
                move |bus: &EventBus| bus.register(&l).unwrap()
            }),
            Box::new({
                let l = Arc::new(Ranked::<1>(log.clone()));
                move |bus: &EventBus| bus.register(&l).unwrap()
            }),
            Box::new({
                let l = Arc::new(Ranked::<2>(log.clone()));
                move |bus: &EventBus| bus.register(&l).unwrap()
            }),
            Box::new({
                let l = Arc::new(Ranked::<3>(log.clone()));
                move |bus: &EventBus| bus.register(&l).unwrap()
            }),
            Box::new({
                let l = Arc::new(Ranked::<4>(log.clone()));
                move |bus: &EventBus| bus.register(&l).unwrap()
            }),
        ];
        regs.shuffle(&mut rand::rng());
        for reg in &regs {
            reg(&bus);
        }

        bus.fire(&Ping).unwrap();
        assert_eq!(taken(&log), vec!["0", "1", "2", "3", "4"]);
    }
}

#[test]
fn fire_without_listeners_is_a_noop() {
    let bus = EventBus::new();
    assert!(bus.fire(&Ping).is_ok());
    assert!(bus.categories().is_empty());

    let log: Log = Arc::default();
    bus.register(&Arc::new(Late(log.clone()))).unwrap();
    assert!(bus.fire(&Pong).is_ok());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn unregister_without_registration_leaves_others_alone() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    let a = Arc::new(Late(log.clone()));
    let never = Arc::new(Early(log.clone()));
    bus.register(&a).unwrap();

    bus.unregister(&never).unwrap();
    bus.unregister(&never).unwrap();
    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["A"]);
}

#[test]
fn handler_error_stops_delivery_and_is_returned_unmodified() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    bus.register(&Arc::new(Tail(log.clone()))).unwrap();
    bus.register(&Arc::new(Faulty(log.clone()))).unwrap();
    bus.register(&Arc::new(Early(log.clone()))).unwrap();

    let err = bus.fire(&Ping).unwrap_err();
    assert_eq!(err.downcast_ref::<Refused>(), Some(&Refused(7)));
    assert_eq!(taken(&log), vec!["B", "faulty"]);
}

#[test]
#[should_panic(expected = "handler panicked")]
fn handler_panic_propagates_to_caller() {
    struct Panicky;
    impl Listener for Panicky {
        fn handlers(set: &mut HandlerSet<Self>) {
            set.handle::<Ping, _>("on_ping", |_, _| panic!("handler panicked"));
        }
    }

    let bus = EventBus::new();
    bus.register(&Arc::new(Panicky)).unwrap();
    let _ = bus.fire(&Ping);
}

#[test]
fn identical_instances_register_and_unregister_independently() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    let first = Arc::new(Late(log.clone()));
    let second = Arc::new(Late(log.clone()));

    bus.register(&first).unwrap();
    bus.register(&second).unwrap();
    assert_eq!(bus.handler_count_for::<Ping>(), 2);

    bus.unregister(&first).unwrap();
    assert!(!bus.is_registered(&first));
    assert!(bus.is_registered(&second));

    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["A"]);
}

#[test]
fn named_levels_order_lowest_to_monitor() {
    struct Levels(Log);
    impl Listener for Levels {
        fn handlers(set: &mut HandlerSet<Self>) {
            set.on::<Ping, _>("monitor", EventPriority::Monitor, |me, _| {
                me.0.lock().unwrap().push("monitor".into());
                Ok(())
            })
            .handle::<Ping, _>("normal", |me, _| {
                me.0.lock().unwrap().push("normal".into());
                Ok(())
            })
            .on::<Ping, _>("lowest", EventPriority::Lowest, |me, _| {
                me.0.lock().unwrap().push("lowest".into());
                Ok(())
            });
        }
    }

    let bus = EventBus::new();
    let log: Log = Arc::default();
    bus.register(&Arc::new(Levels(log.clone()))).unwrap();
    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["lowest", "normal", "monitor"]);
}

#[test]
fn default_priority_comes_from_config() {
    struct Unprioritised(Log);
    impl Listener for Unprioritised {
        fn handlers(set: &mut HandlerSet<Self>) {
            set.handle::<Ping, _>("on_ping", |me, _| {
                me.0.lock().unwrap().push("default".into());
                Ok(())
            });
        }
    }

    let bus = EventBus::builder().with_default_priority(7).build();
    let log: Log = Arc::default();
    bus.register(&Arc::new(Late(log.clone()))).unwrap();
    bus.register(&Arc::new(Unprioritised(log.clone()))).unwrap();
    bus.register(&Arc::new(Early(log.clone()))).unwrap();

    bus.fire(&Ping).unwrap();
    assert_eq!(taken(&log), vec!["B", "default", "A"]);
}

#[test]
fn rejected_event_type_names_the_handler() {
    let bus = EventBus::builder().accept_event::<Pong>().build();
    let log: Log = Arc::default();
    let err = bus.register(&Arc::new(Late(log))).unwrap_err();
    assert!(matches!(err, BusError::EventNotAccepted { .. }));
    assert_eq!(err.handler(), Some("Late::on_ping"));
}
