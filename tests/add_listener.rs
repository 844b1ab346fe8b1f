mod common;

use std::rc::Rc;

use indexmap::IndexMap;
use listener_register::{
    AddEntry, AddOutcome, AddResult, ListenerCriteria, ListenerFlags, ListenerOptions,
    ListenerRegistries, OptionsSlot,
};

use common::{added, Call, SpyTarget};

fn setup() -> (Rc<SpyTarget>, ListenerRegistries<SpyTarget>) {
    (Rc::new(SpyTarget::default()), ListenerRegistries::new())
}

fn single(added: bool) -> AddResult {
    AddResult::Single(AddOutcome::Single(added))
}

fn multi(added: &[bool]) -> AddResult {
    AddResult::Single(AddOutcome::Multi(added.to_vec()))
}

/// `(listener, name, capture)` of every entry for `event_type`, in order.
fn recorded(
    registries: &ListenerRegistries<SpyTarget>,
    target: &Rc<SpyTarget>,
    event_type: &str,
) -> Vec<(u32, Option<String>, bool)> {
    registries
        .get_listeners(target, &ListenerCriteria::new().event_type(event_type))
        .into_iter()
        .map(|e| (e.listener, e.name.clone(), e.capture()))
        .collect()
}

#[test]
fn adds_a_listener_and_passes_options_through() {
    let (target, registries) = setup();
    let flags = ListenerFlags::capture(true);

    assert_eq!(registries.add_listener(&target, AddEntry::new("click", 1).options(true)), single(true));
    assert_eq!(registries.add_listener(&target, AddEntry::new("focus", 2).options(flags)), single(true));
    assert_eq!(registries.add_listener(&target, AddEntry::new("blur", 3)), single(true));

    assert_eq!(
        target.take_calls(),
        vec![
            added("click", 1, true),
            added("focus", 2, flags),
            added("blur", 3, ListenerOptions::Unset),
        ]
    );
    assert_eq!(recorded(&registries, &target, "focus"), vec![(2, None, true)]);
}

#[test]
fn repeated_triple_registers_once() {
    let (target, registries) = setup();

    for attempt in 0..4 {
        let result = registries.add_listener(&target, AddEntry::new("click", 1).options(true));
        assert_eq!(result.as_bool(), Some(attempt == 0));
    }
    assert_eq!(target.take_calls().len(), 1);
}

#[test]
fn same_listener_in_other_phase_is_separate() {
    let (target, registries) = setup();

    registries.add_listener(&target, AddEntry::new("click", 1));
    assert_eq!(registries.add_listener(&target, AddEntry::new("click", 1).options(true)), single(true));
    assert_eq!(
        recorded(&registries, &target, "click"),
        vec![(1, None, false), (1, None, true)]
    );
}

#[test]
fn records_reference_names() {
    let (target, registries) = setup();

    registries.add_listener(&target, AddEntry::new("click", 1).options(true).name("foo"));
    // name in the options slot
    registries.add_listener(
        &target,
        AddEntry::positional("click", 2, OptionsSlot::Text("baz".into()), None),
    );
    // same name, other type
    registries.add_listener(&target, AddEntry::new("focus", 3).name("foo"));

    assert_eq!(
        recorded(&registries, &target, "click"),
        vec![(1, Some("foo".into()), true), (2, Some("baz".into()), false)]
    );
    assert_eq!(recorded(&registries, &target, "focus"), vec![(3, Some("foo".into()), false)]);
    assert_eq!(
        target.take_calls()[1],
        added("click", 2, ListenerOptions::Unset)
    );
}

#[test]
fn suffix_takes_precedence_over_name_argument() {
    let (target, registries) = setup();

    registries.add_listener(&target, AddEntry::new("click.foo", 1).options(true).name("bar"));
    registries.add_listener(&target, AddEntry::new("focus.baz", 2).name("bar"));

    let named = |name| registries.get_listeners(&target, &ListenerCriteria::new().name(name));
    assert_eq!(named("foo").len(), 1);
    assert_eq!(named("baz").len(), 1);
    assert!(named("bar").is_empty());
}

#[test]
fn taken_name_is_rejected_without_native_call() {
    let (target, registries) = setup();
    registries.add_listener(&target, AddEntry::new("click", 2).options(true).name("foo"));
    target.take_calls();

    assert_eq!(
        registries.add_listener(&target, AddEntry::new("click", 1).options(false).name("foo")),
        single(false)
    );
    assert!(target.take_calls().is_empty());
}

#[test]
fn space_separated_types_fan_out() {
    let (target, registries) = setup();

    assert_eq!(
        registries.add_listener(&target, AddEntry::new("click focus", 1).name("foo")),
        multi(&[true, true])
    );
    assert_eq!(
        target.take_calls(),
        vec![
            added("click", 1, ListenerOptions::Unset),
            added("focus", 1, ListenerOptions::Unset),
        ]
    );

    // the name is taken for click, so only keydown registers
    assert_eq!(
        registries.add_listener(&target, AddEntry::new("keydown click", 2).options(true).name("foo")),
        multi(&[true, false])
    );
    assert_eq!(target.take_calls(), vec![added("keydown", 2, true)]);

    assert_eq!(
        registries.add_listener(&target, AddEntry::new("blur click.bar", 3).name("foo")),
        multi(&[true, true])
    );
    assert_eq!(
        recorded(&registries, &target, "click"),
        vec![(1, Some("foo".into()), false), (3, Some("bar".into()), false)]
    );
}

#[test]
fn already_registered_callback_in_fan_out() {
    let (target, registries) = setup();
    registries.add_listener(&target, AddEntry::new("click", 1).options(true));
    target.take_calls();

    let result = registries.add_listener(&target, AddEntry::new("keydown click", 1).options(true).name("foo"));
    assert_eq!(result, multi(&[true, false]));
    assert_eq!(target.take_calls(), vec![added("keydown", 1, true)]);
}

#[test]
fn list_of_entries_returns_list_of_results() {
    let (target, registries) = setup();
    let capture = ListenerFlags::capture(true);

    let result = registries.add_listener(
        &target,
        vec![
            AddEntry::new("click", 1).options(capture),
            AddEntry::new("blur", 2).options(true).name("foo"),
            AddEntry::new("keydown", 3),
        ],
    );
    assert_eq!(result, AddResult::List(vec![true.into(), true.into(), true.into()]));
    assert_eq!(
        target.take_calls(),
        vec![
            added("click", 1, capture),
            added("blur", 2, true),
            added("keydown", 3, ListenerOptions::Unset),
        ]
    );

    let result = registries.add_listener(
        &target,
        vec![
            AddEntry::positional("blur", 9, OptionsSlot::Text("foo".into()), None),
            AddEntry::new("click", 1),
            AddEntry::new("keydown", 3),
        ],
    );
    assert_eq!(result, AddResult::List(vec![false.into(), true.into(), false.into()]));
    assert_eq!(target.take_calls(), vec![added("click", 1, ListenerOptions::Unset)]);

    let result = registries.add_listener(
        &target,
        vec![
            AddEntry::new("click keydown", 4),
            AddEntry::new("click focus", 5).name("foo"),
            AddEntry::new("click focus.bar", 6).options(capture).name("foo"),
        ],
    );
    assert_eq!(
        result,
        AddResult::List(vec![
            vec![true, true].into(),
            vec![true, true].into(),
            vec![false, true].into(),
        ])
    );
    assert_eq!(
        target.take_calls(),
        vec![
            added("click", 4, ListenerOptions::Unset),
            added("keydown", 4, ListenerOptions::Unset),
            added("click", 5, ListenerOptions::Unset),
            added("focus", 5, ListenerOptions::Unset),
            added("focus", 6, capture),
        ]
    );
}

#[test]
fn mapping_returns_mapping_of_results() {
    let (target, registries) = setup();
    let map: IndexMap<String, u32> = [("click", 1), ("focus", 2)]
        .into_iter()
        .map(|(t, l)| (t.to_string(), l))
        .collect();

    let expected: IndexMap<String, AddOutcome> = [("click".to_string(), true.into()), ("focus".to_string(), true.into())]
        .into_iter()
        .collect();
    assert_eq!(registries.add_listener(&target, map.clone()), AddResult::Map(expected));

    let expected: IndexMap<String, AddOutcome> = [("click".to_string(), false.into()), ("focus".to_string(), false.into())]
        .into_iter()
        .collect();
    assert_eq!(registries.add_listener(&target, map), AddResult::Map(expected));
    assert_eq!(target.take_calls().len(), 2);
}

#[test]
fn mapping_keys_fan_out_in_key_order() {
    let (target, registries) = setup();
    registries.add_listener(&target, AddEntry::new("click", 7));
    target.take_calls();

    let mut map = IndexMap::new();
    map.insert("click keydown".to_string(), 7);
    map.insert("click.foo focus.foo".to_string(), 8);
    map.insert("click.foo focus.bar".to_string(), 9);

    let result = registries.add_listener(&target, map);
    let AddResult::Map(outcomes) = result else {
        panic!("expected a mapping result");
    };
    let outcomes: Vec<(&str, AddOutcome)> = outcomes.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    assert_eq!(
        outcomes,
        vec![
            ("click keydown", vec![false, true].into()),
            ("click.foo focus.foo", vec![true, true].into()),
            ("click.foo focus.bar", vec![false, true].into()),
        ]
    );
    let types: Vec<String> = target
        .take_calls()
        .into_iter()
        .map(|call| match call {
            Call::Add(t, l, _) => format!("{t}:{l}"),
            Call::Remove(t, l, _) => format!("-{t}:{l}"),
        })
        .collect();
    assert_eq!(types, vec!["keydown:7", "click:8", "focus:8", "focus:9"]);
}

#[test]
fn dropped_target_record_is_purged() {
    let (target, registries) = setup();
    registries.add_listener(&target, AddEntry::new("click", 1));
    assert_eq!(registries.tracked_targets(), 1);

    drop(target);
    assert_eq!(registries.tracked_targets(), 0);
    assert_eq!(registries.purge(), 1);
    assert_eq!(registries.purge(), 0);
}
