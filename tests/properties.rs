//! Propriétés de l'agrégation, vérifiées sur des séquences de codes aléatoires.

use chrono::{Datelike, Weekday};
use prodcal::calendar::{days_in_year, year_days};
use prodcal::{aggregate, aggregate_raw, aggregate_with_overlay, CalendarYear, DayCode, MonthDay};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_year_codes() -> impl Strategy<Value = (i32, Vec<u8>, Vec<u8>)> {
    (2000i32..=2040).prop_flat_map(|year| {
        let len = days_in_year(year).unwrap();
        let code = prop::sample::select(vec![0u8, 1, 2, 4]);
        (
            Just(year),
            prop::collection::vec(code.clone(), len),
            prop::collection::vec(code, len),
        )
    })
}

type Overlaid = (i32, Vec<DayCode>, Vec<DayCode>, BTreeSet<MonthDay>, BTreeSet<MonthDay>);

/// Codes des deux conventions plus deux ensembles de jours imposés tirés dans l'année.
fn arb_year_with_overlay() -> impl Strategy<Value = Overlaid> {
    arb_year_codes().prop_flat_map(|(year, five, six)| {
        let len = days_in_year(year).unwrap();
        let days: Vec<MonthDay> = year_days(year).unwrap().map(MonthDay::from_date).collect();
        let pick = move |indices: BTreeSet<usize>| -> BTreeSet<MonthDay> {
            indices.into_iter().map(|i| days[i]).collect()
        };
        let decode = |raw: Vec<u8>| -> Vec<DayCode> {
            raw.into_iter().map(|c| DayCode::try_from(c).unwrap()).collect()
        };
        (
            Just(year),
            Just(decode(five)),
            Just(decode(six)),
            prop::collection::btree_set(0..len, 0..24).prop_map(pick.clone()),
            prop::collection::btree_set(0..len, 0..24).prop_map(pick),
        )
    })
}

fn strictly_ascending(days: &[MonthDay]) -> bool {
    days.windows(2).all(|w| w[0] < w[1]) && {
        let text: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        text.windows(2).all(|w| w[0] < w[1])
    }
}

fn disjoint(lists: &[&[MonthDay]]) -> bool {
    let mut seen = BTreeSet::new();
    lists.iter().flat_map(|l| l.iter()).all(|d| seen.insert(*d))
}

proptest! {
    #[test]
    fn deterministic((year, five, six) in arb_year_codes()) {
        let a = aggregate_raw(year, &five, &six).unwrap();
        let b = aggregate_raw(year, &five, &six).unwrap();
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn lists_are_sorted_unique_and_disjoint((year, five, six) in arb_year_codes()) {
        let cal: CalendarYear = aggregate_raw(year, &five, &six).unwrap();
        for (_, days) in cal.categories() {
            prop_assert!(strictly_ascending(days));
        }
        prop_assert!(disjoint(&[cal.nonworking_days(), cal.working_days(), cal.shortened_days()]));
        prop_assert!(disjoint(&[cal.nonworking_days6(), cal.shortened_days6()]));
        prop_assert!(cal.validate().is_ok());
    }

    #[test]
    fn regular_weekends_never_listed_as_holidays((year, five, six) in arb_year_codes()) {
        let cal = aggregate_raw(year, &five, &six).unwrap();
        for date in year_days(year).unwrap() {
            let md = MonthDay::from_date(date);
            match date.weekday() {
                Weekday::Sat => prop_assert!(!cal.nonworking_days().contains(&md)),
                Weekday::Sun => {
                    prop_assert!(!cal.nonworking_days().contains(&md));
                    prop_assert!(!cal.nonworking_days6().contains(&md));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn five_day_lists_fit_in_the_year((year, five, six) in arb_year_codes()) {
        let cal = aggregate_raw(year, &five, &six).unwrap();
        let total = cal.nonworking_days().len() + cal.working_days().len() + cal.shortened_days().len();
        prop_assert!(total <= days_in_year(year).unwrap());
    }

    #[test]
    fn overlay_keeps_lists_sorted_and_disjoint(
        (year, five, six, overlay5, overlay6) in arb_year_with_overlay()
    ) {
        let cal = aggregate_with_overlay(year, &five, &six, &overlay5, &overlay6).unwrap();
        for (_, days) in cal.categories() {
            prop_assert!(strictly_ascending(days));
        }
        prop_assert!(disjoint(&[cal.nonworking_days(), cal.working_days(), cal.shortened_days()]));
        prop_assert!(disjoint(&[cal.nonworking_days6(), cal.shortened_days6()]));
        prop_assert!(cal.validate().is_ok());
    }

    #[test]
    fn overlay_only_adds_nonworking_days(
        (year, five, six, overlay5, overlay6) in arb_year_with_overlay()
    ) {
        let plain = aggregate(year, &five, &six).unwrap();
        let cal = aggregate_with_overlay(year, &five, &six, &overlay5, &overlay6).unwrap();

        prop_assert_eq!(cal.working_days(), plain.working_days());
        prop_assert_eq!(cal.shortened_days(), plain.shortened_days());
        prop_assert_eq!(cal.shortened_days6(), plain.shortened_days6());
        for md in plain.nonworking_days() {
            prop_assert!(cal.nonworking_days().contains(md));
        }
        for md in plain.nonworking_days6() {
            prop_assert!(cal.nonworking_days6().contains(md));
        }
        for md in &overlay5 {
            let taken = cal.working_days().contains(md) || cal.shortened_days().contains(md);
            prop_assert!(taken || cal.nonworking_days().contains(md));
        }
        for md in &overlay6 {
            prop_assert!(cal.shortened_days6().contains(md) || cal.nonworking_days6().contains(md));
        }
    }
}
