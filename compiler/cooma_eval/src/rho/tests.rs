use super::*;
use cooma_ir::StringInterner;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn names(count: u32) -> (StringInterner, Vec<Name>) {
    let interner = StringInterner::new();
    let names = (0..count)
        .map(|i| interner.intern(&format!("v{i}")))
        .collect();
    (interner, names)
}

#[test]
fn empty_environment_binds_nothing() {
    let (_interner, names) = names(1);
    let rho = Rho::new();
    assert!(rho.is_empty());
    assert_eq!(rho.depth(), 0);
    assert_eq!(rho.lookup(names[0]), None);
}

#[test]
fn inner_binding_shadows_outer() {
    let (_interner, names) = names(1);
    let x = names[0];
    let outer = Rho::new().extend(x, Value::int(1));
    let inner = outer.extend(x, Value::int(2));
    assert_eq!(inner.lookup(x), Some(Value::int(2)));
    assert_eq!(outer.lookup(x), Some(Value::int(1)));
}

#[test]
fn extend_leaves_receiver_untouched() {
    let (_interner, names) = names(2);
    let base = Rho::new().extend(names[0], Value::int(1));
    let _child = base.extend(names[1], Value::int(2));
    assert!(!base.contains(names[1]));
    assert_eq!(base.depth(), 1);
}

#[test]
fn extend_many_uses_one_frame() {
    let (_interner, names) = names(3);
    let rho = Rho::new().extend_many(names.iter().map(|n| (*n, Value::Unit)));
    assert_eq!(rho.depth(), 1);
    assert_eq!(rho.local_names(), names);
}

#[test]
fn extend_many_empty_returns_receiver() {
    let (_interner, names) = names(1);
    let base = Rho::new().extend(names[0], Value::int(1));
    let same = base.extend_many(std::iter::empty());
    assert!(same.ptr_eq(&base));
}

#[test]
fn later_duplicate_in_batch_wins() {
    let (_interner, names) = names(1);
    let x = names[0];
    let rho = Rho::new().extend_many([(x, Value::int(1)), (x, Value::int(2))]);
    assert_eq!(rho.lookup(x), Some(Value::int(2)));
}

#[test]
fn dropping_a_long_chain_does_not_recurse() {
    let (_interner, names) = names(1);
    let mut rho = Rho::new();
    for n in 0..200_000 {
        rho = rho.extend(names[0], Value::int(n));
    }
    assert_eq!(rho.lookup(names[0]), Some(Value::int(199_999)));
    drop(rho);
}

#[test]
fn environments_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Rho>();
}

proptest! {
    /// Looking a name up returns its most recent binding, and every
    /// intermediate environment still sees what it saw when it was built.
    #[test]
    fn lookup_sees_most_recent_binding(ops in prop::collection::vec((0u32..6, any::<i64>()), 0..40)) {
        let (_interner, names) = names(6);
        let mut rho = Rho::new();
        let mut model: Vec<Option<i64>> = vec![None; names.len()];
        let mut snapshots = Vec::new();

        for (slot, value) in ops {
            let slot = slot as usize;
            rho = rho.extend(names[slot], Value::int(value));
            model[slot] = Some(value);
            snapshots.push((rho.clone(), model.clone()));
        }

        for (snapshot, expected) in snapshots {
            for (slot, name) in names.iter().enumerate() {
                prop_assert_eq!(snapshot.lookup(*name), expected[slot].map(Value::int));
            }
        }
    }

    /// A batch frame agrees with binding the same pairs one at a time.
    #[test]
    fn batch_matches_sequential(pairs in prop::collection::vec((0u32..4, any::<i64>()), 0..12)) {
        let (_interner, names) = names(4);
        let batch = Rho::new().extend_many(
            pairs.iter().map(|(slot, value)| (names[*slot as usize], Value::int(*value))),
        );
        let sequential = pairs.iter().fold(Rho::new(), |rho, (slot, value)| {
            rho.extend(names[*slot as usize], Value::int(*value))
        });
        for name in &names {
            prop_assert_eq!(batch.lookup(*name), sequential.lookup(*name));
        }
    }
}
