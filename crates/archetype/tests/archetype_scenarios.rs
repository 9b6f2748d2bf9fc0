use docline_archetype::{
    combine, enumerate_orders, ArchetypeConfig, ArchetypeSearch, FoldOrder, TokenSequence,
};
use pretty_assertions::assert_eq;

fn seq(text: &str) -> TokenSequence {
    TokenSequence::from_text(text)
}

fn batch_search() -> ArchetypeSearch {
    ArchetypeSearch::new(&ArchetypeConfig::for_batch()).expect("valid config")
}

#[test]
fn shared_prefix_and_suffix_drop_the_varying_word() {
    let archetype = batch_search().extract_archetype([
        seq("the quick fox jumps"),
        seq("the slow fox jumps"),
        seq("the lazy fox jumps"),
    ]);
    assert_eq!(archetype, seq("the fox jumps"));
}

#[test]
fn disjoint_members_have_empty_archetype() {
    let archetype = batch_search().extract_archetype([seq("alpha beta"), seq("gamma delta")]);
    assert!(archetype.is_empty());
}

#[test]
fn nested_subset_is_the_archetype() {
    let archetype = batch_search().extract_archetype([seq("a b c"), seq("a c")]);
    assert_eq!(archetype, seq("a c"));
}

#[test]
fn empty_cluster() {
    assert!(batch_search()
        .extract_archetype(Vec::<TokenSequence>::new())
        .is_empty());
}

#[test]
fn duplicates_do_not_change_the_result() {
    let a = seq("Returns the value of the field");
    let b = seq("Returns the cached value of this field");
    let search = batch_search();
    assert_eq!(
        search.extract_archetype([a.clone(), a.clone(), b.clone()]),
        search.extract_archetype([a, b])
    );
}

#[test]
fn input_order_does_not_matter() {
    let members = vec![
        seq("Creates a new builder with default settings"),
        seq("Creates a new parser with default settings"),
        seq("Creates a builder with custom settings"),
        seq("Creates a new builder"),
    ];
    let mut reversed = members.clone();
    reversed.reverse();

    // Separate searches so the second answer is recomputed, not a cache hit.
    let first = batch_search().extract_archetype(members);
    let second = batch_search().extract_archetype(reversed);
    assert_eq!(first, second);
}

#[test]
fn fold_order_changes_the_result_and_both_orders_are_explored() {
    let a = seq("a b c d e");
    let b = seq("c d e a b");
    let c = seq("a b x y");

    let via_b = combine(&combine(&a, &b), &c);
    let via_c = combine(&combine(&a, &c), &b);
    assert!(via_b.is_empty());
    assert_eq!(via_c, seq("a b"));

    // Canonical member order is [a, c, b]; with cover 2 the enumeration visits
    // both (a, c, b) and (a, b, c).
    let orders: Vec<FoldOrder> = enumerate_orders(3, 2).collect();
    assert!(orders.iter().any(|o| o.as_slice() == [0, 1, 2]));
    assert!(orders.iter().any(|o| o.as_slice() == [0, 2, 1]));

    let config = ArchetypeConfig {
        cover: 2,
        ..ArchetypeConfig::for_batch()
    };
    let outcome = ArchetypeSearch::new(&config)
        .expect("valid config")
        .extract_with_stats([a, b, c]);
    assert_eq!(outcome.orders_tried, 3);
    assert_eq!(outcome.archetype, via_c);
    assert_eq!(outcome.score, 3);
}

#[test]
fn ties_keep_the_first_enumerated_candidate() {
    // Every order folds to a single one-character token; the first order wins.
    let config = ArchetypeConfig {
        cover: 2,
        ..ArchetypeConfig::for_batch()
    };
    let outcome = ArchetypeSearch::new(&config)
        .expect("valid config")
        .extract_with_stats([seq("x y z"), seq("y z x"), seq("z x y")]);

    let first = enumerate_orders(3, 2).next().expect("at least one order");
    assert_eq!(outcome.best_order, Some(first));
    assert_eq!(outcome.score, 1);
}

#[test]
fn shared_cache_serves_repeated_clusters() {
    let search = batch_search();
    let cluster = [
        seq("Gets the current user"),
        seq("Gets the current session"),
    ];
    let first = search.extract_with_stats(cluster.clone());
    let second = search.extract_with_stats(cluster);

    assert!(second.from_cache);
    assert_eq!(first.archetype, seq("Gets the current"));
    assert_eq!(search.cache().stats().clusters.hits, 1);
}
