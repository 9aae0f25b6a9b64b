use canon_set::console::Console;
use canon_set::{cset, CanonicalValueSet, Element, IntRange, Member, RealInterval, SetError};

fn four_pieces() -> CanonicalValueSet {
    cset![
        1..=5,
        RealInterval::open(5.5, 6.5).unwrap(),
        7..=10,
        RealInterval::open_right(11.0, 15.0).unwrap(),
    ]
    .unwrap()
}

#[test]
fn mixed_ranges_render_and_count() {
    let set = four_pieces();
    assert_eq!(set.size(), 9);
    assert_eq!(set.to_string(), "1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0)");
    assert!(!set.contains(1..=15).unwrap());
    assert!(set.contains(1..=14).unwrap());
}

#[test]
fn integer_closes_half_open_interval() {
    let mut set = four_pieces();
    set.add(15).unwrap();
    assert_eq!(set.size(), 9);
    assert_eq!(set.to_string(), "1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0]");
    assert!(set.contains(1..=15).unwrap());
    assert!(set.contains(RealInterval::closed(11.0, 15.0)).unwrap());
}

#[test]
fn integer_difference_splits_range() {
    let a = cset![1..=10].unwrap();
    let b = cset![3..=5].unwrap();
    let diff = &a - &b;
    let ranges: Vec<IntRange> = diff.integer_store().iter().collect();
    assert_eq!(ranges, vec![IntRange::new(1, 2), IntRange::new(6, 10)]);
    assert_eq!(diff.size(), 7);
}

#[test]
fn open_interval_integer_bounds() {
    let interval = RealInterval::open(2.0, 7.0).unwrap();
    assert_eq!(interval.first_int(), 3);
    assert_eq!(interval.last_int(), 6);
}

#[test]
fn continuous_interval_makes_set_infinite() {
    let set = cset![1, 2.0..=2.5].unwrap();
    assert!(set.is_infinite());
    assert!(matches!(set.iter(), Err(SetError::InfiniteSetIteration)));
    let members: Vec<Member> = set.finite_iter().collect();
    assert_eq!(members[0], Member::Integer(1));
    assert_eq!(members[1], Member::Interval(&RealInterval::closed(2.0, 2.5)));
    assert_eq!(members.len(), 2);
}

#[test]
fn nested_set_copies_are_independent() {
    let mut inner = cset![1, 2].unwrap();
    let outer = cset![inner.clone(), "tag"].unwrap();
    inner.add(3).unwrap();
    assert!(outer.contains(cset![1..=2].unwrap()).unwrap());
    assert!(!outer.contains(inner).unwrap());
    assert_eq!(outer.to_string(), "tag, {1, 2}");
}

#[test]
fn union_and_intersection_across_domains() {
    let a = cset![0.0..=3.0, 10..=12, "a"].unwrap();
    let b = cset![2..=11, "a", "b"].unwrap();

    let union = &a | &b;
    assert_eq!(union.to_string(), "[0.0, 3.0], 4, 5, 6, 7, 8, 9, 10, 11, 12, a, b");

    let both = &a & &b;
    assert_eq!(both.to_string(), "2, 3, 10, 11, a");
    assert!(both.is_finite());
    assert_eq!(both.size(), 5);
}

#[test]
fn equality_is_structural() {
    let a = cset![1..=3, 2.5, true].unwrap();
    let b = cset![true, 3, 2.5, 1..=2].unwrap();
    assert_eq!(a, b);
    assert!(a.includes(&b) && b.includes(&a));
    assert_ne!(a, cset![1..=3].unwrap());
}

#[test]
fn contains_all_and_elements() {
    let set = cset![1..=4, RealInterval::open(4.0, 5.0).unwrap()].unwrap();
    assert!(set.contains_all([Element::from(2), Element::from(4.5)]).unwrap());
    assert!(!set.contains_all([Element::from(2), Element::from(5.0)]).unwrap());
    assert_eq!(set.elements().len(), 2);
}

#[test]
fn console_transcript() {
    let input = "[1,5] (5.5,6.5) [7,10] [11.0,15.0)\n?[1, 15]\n15\n?[1, 15]\nexit\n";
    let mut console = Console::new(Vec::new());
    console.run(input.as_bytes()).unwrap();
    let out = String::from_utf8(console.into_inner()).unwrap();
    assert_eq!(
        out,
        "> 9: 1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0)\n\n\
         > false\n\
         > 9: 1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0]\n\n\
         > true\n\
         > "
    );
}
