//! Properties of the name filter and the comparison selection that hold
//! for any input

use ce_core::Country;
use ce_event_bus::EventBus;
use ce_selection::{
    filter_countries, matches_query, SelectionChange, SelectionManager, SELECTION_CAPACITY,
};
use proptest::prelude::*;
use std::sync::Arc;

const POOL: [&str; 5] = ["France", "Germany", "Japan", "Niger", "Chile"];

fn countries(names: &[String]) -> Vec<Country> {
    names.iter().map(|n| Country::new(n.as_str(), n.as_str())).collect()
}

proptest! {
    #[test]
    fn filter_keeps_order_and_only_matches(
        raw in prop::collection::vec("[A-Za-zÅÔé' -]{0,12}", 0..20),
        query in "[a-zA-Zé ]{0,3}",
    ) {
        let countries = countries(&raw);
        let filtered = filter_countries(&countries, &query);

        prop_assert!(filtered.iter().all(|c| matches_query(c, &query)));
        prop_assert_eq!(
            filtered.len(),
            countries.iter().filter(|c| matches_query(c, &query)).count()
        );

        let positions: Vec<usize> = filtered
            .iter()
            .map(|f| countries.iter().position(|c| std::ptr::eq(c, *f)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        prop_assert_eq!(filter_countries(&countries, "").len(), countries.len());
    }

    #[test]
    fn selection_stays_within_capacity(
        picks in prop::collection::vec(0usize..POOL.len(), 0..200),
    ) {
        let pool: Vec<Country> = POOL.iter().map(|n| Country::new(*n, *n)).collect();
        let mut selection = SelectionManager::new(Arc::new(EventBus::new()));

        for pick in picks {
            let country = &pool[pick];
            let before = selection.names();
            let change = selection.toggle(country);
            let after = selection.names();

            prop_assert!(after.len() <= SELECTION_CAPACITY);
            prop_assert!(after.len() < 2 || after[0] != after[1]);

            match change {
                SelectionChange::Added { len } => {
                    prop_assert_eq!(len, after.len());
                    prop_assert_eq!(after.last().map(String::as_str), Some(POOL[pick]));
                }
                SelectionChange::Removed { now_empty } => {
                    prop_assert!(!after.iter().any(|n| n == POOL[pick]));
                    prop_assert_eq!(now_empty, after.is_empty());
                    let survivors: Vec<String> =
                        before.into_iter().filter(|n| n != POOL[pick]).collect();
                    prop_assert_eq!(&survivors, &after);
                }
                SelectionChange::Replaced { previous } => {
                    prop_assert_eq!(before.len(), SELECTION_CAPACITY);
                    prop_assert_eq!(&after[0], &before[0]);
                    prop_assert_eq!(after[1].as_str(), POOL[pick]);
                    prop_assert_eq!(previous.common_name(), before[1].as_str());
                }
            }
        }
    }
}
