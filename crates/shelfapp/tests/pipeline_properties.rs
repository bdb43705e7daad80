use proptest::prelude::*;
use proptest::test_runner::Config;
use shelfapp::facets::available_tags;
use shelfapp::model::{Choice, SortKey, Tool};
use shelfapp::pipeline::{base_matches, compute_visible, filter_and_sort, PAGE_SIZE};
use shelfapp::state::{FilterEvent, FilterState};
use std::collections::{BTreeSet, HashSet};

const PRICES: [&str; 5] = ["Gratuito", "Freemium", "Pago", "Assinatura", "Vitalício"];
const TAGS: [&str; 4] = ["ia", "texto", "imagem", "design"];

prop_compose! {
    fn arb_tool()(
        name in "[A-Ca-cÁé ]{1,4}",
        intro in "[a-d ]{0,6}",
        price in prop::sample::select(PRICES.to_vec()),
        tags in prop::sample::subsequence(TAGS.to_vec(), 0..=3),
        comment in prop::option::of("[a-b ]{0,2}"),
    ) -> Tool {
        let mut tool = Tool::new(name, price).with_tags(tags).with_text(intro, "");
        if let Some(c) = comment {
            tool = tool.with_admin_comment(c);
        }
        tool
    }
}

fn arb_choice(values: &'static [&'static str]) -> impl Strategy<Value = Choice> {
    prop_oneof![
        Just(Choice::All),
        prop::sample::select(values.to_vec()).prop_map(Choice::only),
    ]
}

prop_compose! {
    fn arb_state()(
        tag in arb_choice(&TAGS),
        price in arb_choice(&PRICES),
        admin in any::<bool>(),
        favorites in any::<bool>(),
        search in "[a-dA-D ]{0,2}",
        by_price in any::<bool>(),
        page in 1_usize..5,
    ) -> FilterState {
        let sort = if by_price { SortKey::ByPrice } else { SortKey::ByName };
        [
            FilterEvent::SelectTag(tag),
            FilterEvent::SelectPrice(price),
            FilterEvent::SetAdminOnly(admin),
            FilterEvent::SetFavoritesOnly(favorites),
            FilterEvent::SetSearch(search),
            FilterEvent::SetSort(sort),
            FilterEvent::GoToPage(page),
        ]
        .into_iter()
        .fold(FilterState::default(), |s, e| s.apply(e))
    }
}

prop_compose! {
    fn arb_session()(records in prop::collection::vec(arb_tool(), 0..30))(
        favorites in prop::sample::subsequence(
            records.iter().map(|t| t.name.clone()).collect::<Vec<_>>(),
            0..=records.len(),
        ),
        records in Just(records),
        state in arb_state(),
    ) -> (Vec<Tool>, HashSet<String>, FilterState) {
        (records, favorites.into_iter().collect(), state)
    }
}

/// The conjunction of every active predicate, written out longhand.
fn satisfies(tool: &Tool, state: &FilterState, favorites: &HashSet<String>) -> bool {
    let term = state.search_term.trim().to_lowercase();
    let price_ok = match &state.active_price {
        Choice::All => true,
        Choice::Only(p) => &tool.price == p,
    };
    let admin_ok = !state.admin_only
        || tool
            .admin_comment
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());
    let fav_ok = !state.favorites_only || favorites.contains(&tool.name);
    let tag_ok = match &state.active_tag {
        Choice::All => true,
        Choice::Only(t) => tool.tags.contains(t),
    };
    let search_ok = term.is_empty()
        || [&tool.name, &tool.intro, &tool.description]
            .iter()
            .any(|f| f.to_lowercase().contains(&term))
        || tool.tags.iter().any(|t| t.to_lowercase().contains(&term));
    price_ok && admin_ok && fav_ok && tag_ok && search_ok
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn total_matches_predicate_count((records, favorites, state) in arb_session()) {
        let expected = records.iter().filter(|t| satisfies(t, &state, &favorites)).count();
        let view = compute_visible(&records, &state, &favorites);
        prop_assert_eq!(view.total_matching, expected);

        let resorted = state.apply(FilterEvent::SetSort(match state.sort_key {
            SortKey::ByName => SortKey::ByPrice,
            SortKey::ByPrice => SortKey::ByName,
        }));
        prop_assert_eq!(compute_visible(&records, &resorted, &favorites).total_matching, expected);
    }

    #[test]
    fn pipeline_is_idempotent((records, favorites, state) in arb_session()) {
        let first = compute_visible(&records, &state, &favorites);
        let second = compute_visible(&records, &state, &favorites);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pages_partition_the_sorted_matches((records, favorites, state) in arb_session()) {
        let sorted: Vec<Tool> = filter_and_sort(&records, &state, &favorites)
            .into_iter()
            .cloned()
            .collect();
        let total_pages = compute_visible(&records, &state, &favorites).total_pages();

        let mut joined = Vec::new();
        for page in 1..=total_pages {
            let view = compute_visible(&records, &state.apply(FilterEvent::GoToPage(page)), &favorites);
            prop_assert!(view.items.len() <= PAGE_SIZE);
            if page < total_pages {
                prop_assert_eq!(view.items.len(), PAGE_SIZE);
            }
            joined.extend(view.items);
        }
        prop_assert_eq!(joined, sorted);

        let past = compute_visible(&records, &state.apply(FilterEvent::GoToPage(total_pages + 1)), &favorites);
        prop_assert!(past.is_empty());
    }

    #[test]
    fn tag_facet_is_exactly_the_base_filtered_tags((records, favorites, state) in arb_session()) {
        let expected: BTreeSet<String> = records
            .iter()
            .filter(|t| base_matches(t, &state, &favorites))
            .flat_map(|t| t.tags.iter().cloned())
            .collect();
        let tags = available_tags(&records, &state, &favorites);
        prop_assert_eq!(tags, expected.into_iter().collect::<Vec<_>>());
    }
}
