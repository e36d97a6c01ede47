use super::*;

#[test]
fn intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("x");
    let c = interner.intern("y");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "x");
    assert_eq!(interner.lookup(c), "y");
}

#[test]
fn empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn foreign_name_resolves_to_placeholder() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "<unknown>");
}

#[test]
fn shared_interner_is_shared_across_threads() {
    let shared = SharedInterner::new();
    let names: Vec<Name> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let interner = shared.clone();
                s.spawn(move || interner.intern("shared"))
            })
            .collect();
        handles.into_iter().filter_map(|h| h.join().ok()).collect()
    });
    assert_eq!(names.len(), 4);
    assert!(names.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(shared.lookup(names[0]), "shared");
}
