// ChainedHashMap scenario tests through the public API.
use rbchain::{ChainedHashMap, MapConfig, MapError};

// Growth from a single bucket.
// Capacities 1, 2, 4, 8, 8 after adding k1..k5; every earlier
// key still maps to its original value after each step.
#[test]
fn grows_from_single_bucket() {
    let mut m = ChainedHashMap::with_capacity(1).unwrap();
    let mut added: Vec<(String, String)> = Vec::new();
    for (i, cap) in [1usize, 2, 4, 8, 8].into_iter().enumerate() {
        let k = format!("k{}", i + 1);
        let v = format!("v{}", i + 1);
        assert_eq!(m.add(&k, &v).unwrap(), None);
        added.push((k, v));

        assert_eq!(m.capacity(), cap);
        assert_eq!(m.len(), added.len());
        for (pk, pv) in &added {
            assert_eq!(m.get(pk), Some(pv.as_str()), "lost {} at step {}", pk, i + 1);
        }
    }
}

// Lookups of missing keys.
// Absent keys return None on empty, populated and grown maps.
#[test]
fn absent_key_is_none() {
    let mut m = ChainedHashMap::new();
    assert_eq!(m.get("ghost"), None);
    for i in 0..100 {
        m.add(&format!("key{}", i), "v").unwrap();
    }
    assert!(m.capacity() > 8);
    assert_eq!(m.get("ghost"), None);
    assert!(!m.contains_key("key100"));
}

// Many entries sharing few buckets.
// Chains of any length keep every pair distinct and reachable.
#[test]
fn long_chains_resolve_each_key() {
    let cfg = MapConfig::new()
        .with_initial_capacity(2)
        .with_max_load_factor(64.0);
    let mut m = ChainedHashMap::with_config(cfg).unwrap();
    for i in 0..100 {
        m.add(&format!("c{}", i), &format!("{}", i * i)).unwrap();
    }
    assert_eq!(m.capacity(), 2);
    for i in 0..100 {
        assert_eq!(m.get(&format!("c{}", i)), Some(format!("{}", i * i).as_str()));
    }
    assert_eq!(m.iter().count(), 100);
}

// Replace, remove and re-add.
// Values follow the last add; removed keys can come back.
#[test]
fn replace_remove_readd() {
    let mut m = ChainedHashMap::new();
    m.add("k", "one").unwrap();
    assert_eq!(m.add("k", "two").unwrap().as_deref(), Some("one"));
    assert_eq!(m.remove("k").as_deref(), Some("two"));
    assert!(m.is_empty());
    assert_eq!(m.add("k", "three").unwrap(), None);
    assert_eq!(m.get("k"), Some("three"));
}

// Empty strings are ordinary keys and values.
#[test]
fn empty_key_and_value() {
    let mut m = ChainedHashMap::new();
    m.add("", "").unwrap();
    m.add("x", "").unwrap();
    assert_eq!(m.get(""), Some(""));
    assert_eq!(m.get("x"), Some(""));
    assert_eq!(m.len(), 2);
}

// Error reporting.
// Construction errors carry a readable message.
#[test]
fn construction_errors_display() {
    let err = ChainedHashMap::with_capacity(0).unwrap_err();
    assert!(matches!(err, MapError::ZeroCapacity));
    assert!(!err.to_string().is_empty());

    let cfg = MapConfig::new().with_max_load_factor(-0.5);
    let err = ChainedHashMap::with_config(cfg).unwrap_err();
    assert!(err.to_string().contains("-0.5"));
}
