//! List derivation and page view model through the public API.

use boostfocus::view::{compare, derive, sort_todos};
use boostfocus::{handle_event, AppState, Event, Response, SortKey, TodoItem, ViewOption, ViewQuery};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cmp::Ordering;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap()
}

fn item(id: &str, text: &str, created_offset: i64, deadline_offset: Option<i64>) -> TodoItem {
    let mut todo = TodoItem::new(
        text,
        deadline_offset.map(|h| base() + Duration::hours(h)),
        base() + Duration::minutes(created_offset),
    );
    todo.id = id.to_string();
    todo
}

fn ids(todos: &[&TodoItem]) -> Vec<String> {
    todos.iter().map(|t| t.id.clone()).collect()
}

#[test]
fn missing_deadline_sits_at_the_far_end() {
    let dated = item("dated", "a", 0, Some(1));
    let undated = item("undated", "b", 0, None);

    assert_eq!(compare(&undated, &dated, SortKey::Deadline, true), Ordering::Greater);
    assert_eq!(compare(&undated, &dated, SortKey::Deadline, false), Ordering::Less);
    assert_eq!(compare(&undated, &undated, SortKey::Deadline, true), Ordering::Equal);
}

#[test]
fn text_sort_ignores_case_and_is_stable() {
    let todos = vec![
        item("1", "banana", 0, None),
        item("2", "Apple", 1, None),
        item("3", "apple", 2, None),
    ];
    let mut refs: Vec<&TodoItem> = todos.iter().collect();
    sort_todos(&mut refs, SortKey::Text, true);
    assert_eq!(ids(&refs), ["2", "3", "1"]);
}

#[test]
fn completed_sort_puts_incomplete_first() {
    let mut done = item("done", "x", 0, None);
    done.completed = true;
    let todos = vec![done, item("open", "y", 1, None)];

    let query = ViewQuery { sort_key: SortKey::Completed, ..ViewQuery::default() };
    assert_eq!(ids(&derive(&todos, &query)), ["open", "done"]);
}

#[test]
fn archived_view_keeps_focus_pin() {
    let mut old = item("old", "x", 0, Some(1));
    old.archived = true;
    let mut pinned = item("pinned", "y", 1, Some(5));
    pinned.archived = true;
    pinned.focused = true;
    let todos = vec![old, pinned, item("live", "z", 2, None)];

    let query = ViewQuery { view: ViewOption::Archived, ..ViewQuery::default() };
    assert_eq!(ids(&derive(&todos, &query)), ["pinned", "old"]);
}

#[test]
fn page_flow_from_load_to_render() {
    let mut state = AppState::default();
    let todos = vec![item("a", "write report", 0, Some(2)), item("b", "email", 1, None)];

    let (render, _) = handle_event(&mut state, &Event::Reply(Response::Todos { todos })).unwrap();
    assert!(render);

    handle_event(&mut state, &Event::ToggleFocus { id: "b".into() }).unwrap();
    handle_event(&mut state, &Event::SortChange(SortKey::CreatedAt)).unwrap();
    handle_event(&mut state, &Event::SortChange(SortKey::CreatedAt)).unwrap();

    let vm = state.compute_viewmodel(base());
    let texts: Vec<&str> = vm.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["email", "write report"]);
    assert_eq!(vm.rows[1].countdown.as_deref(), Some("2h 0m"));
    assert_eq!(vm.tabs[0].label, "Active (2)");
    assert!(vm.sort_buttons[1].active);
    assert_eq!(vm.sort_buttons[1].title, "Sort by creation date (newest first)");
}

fn permutations(items: &[TodoItem]) -> Vec<Vec<TodoItem>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

fn mixed_set() -> Vec<TodoItem> {
    let mut apple = item("c", "Apple", 2, Some(1));
    apple.completed = true;
    vec![
        item("a", "fig", 0, Some(3)),
        item("b", "éclair", 1, None),
        apple,
        item("d", "banana", 3, Some(2)),
    ]
}

#[test]
fn every_input_order_gives_the_same_list() {
    let set = mixed_set();
    let orders = permutations(&set);
    assert_eq!(orders.len(), 24);

    for key in SortKey::ALL {
        for ascending in [true, false] {
            let query = ViewQuery { view: ViewOption::All, sort_key: key, ascending, ..ViewQuery::default() };
            let reference = derive(&orders[0], &query);

            for order in &orders[1..] {
                let derived = derive(order, &query);
                if key == SortKey::Completed {
                    // only two distinct values, so compare the keys themselves
                    let flags = |list: &[&TodoItem]| list.iter().map(|t| t.completed).collect::<Vec<_>>();
                    assert_eq!(flags(&derived), flags(&reference), "{key:?} ascending={ascending}");
                } else {
                    assert_eq!(ids(&derived), ids(&reference), "{key:?} ascending={ascending}");
                }
            }
        }
    }

    let by_text = ViewQuery { view: ViewOption::All, sort_key: SortKey::Text, ..ViewQuery::default() };
    assert_eq!(ids(&derive(&set, &by_text)), ["c", "d", "b", "a"]);
}

#[test]
fn focused_todos_lead_for_every_sort() {
    let mut set = mixed_set();
    set[1].focused = true;
    set[3].focused = true;
    set.push(item("e", "zucchini", 4, Some(0)));

    for key in SortKey::ALL {
        for ascending in [true, false] {
            let query = ViewQuery { sort_key: key, ascending, ..ViewQuery::default() };
            let derived = derive(&set, &query);

            assert_eq!(derived.len(), 5);
            assert!(
                derived[..2].iter().all(|t| t.focused) && derived[2..].iter().all(|t| !t.focused),
                "{key:?} ascending={ascending}: {:?}",
                ids(&derived)
            );
        }
    }
}
