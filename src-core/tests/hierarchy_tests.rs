//! Role-based resolution of the user set feeding a dashboard.

mod support;

use salesdesk_core::quota::quota_model::{TeamSelection, ViewScope};
use salesdesk_core::quota::QuotaAggregator;
use salesdesk_core::users::users_model::{Role, User, UserDirectory};

use support::user;

fn directory() -> UserDirectory {
    UserDirectory::new(vec![
        user("d1", "Dana Director", Role::Director, "Sales", None),
        user("adm", "Ari Admin", Role::Admin, "Admin", None),
        user("h1", "Hari Head", Role::Head, "Sales", None),
        user("m1", "Mira Manager", Role::Manager, "Sales", Some("h1")),
        user("m2", "Mohan Manager", Role::Manager, "Sales", Some("h1")),
        user("a1", "Asha AM", Role::AssistantManager, "Sales", Some("m1")),
        user("e1", "Ezra Exec", Role::Executive, "Sales", Some("m1")),
        user("e2", "Elif Exec", Role::Executive, "Sales", Some("m2")),
        // Outside Sales: never part of pipeline rollups.
        user("hr1", "Hema HR", Role::Manager, "HR", None),
    ])
}

fn resolve(viewer: &User, scope: ViewScope, team: TeamSelection) -> Vec<String> {
    let deals = Vec::new();
    let targets = Vec::new();
    let dir = directory();
    let agg = QuotaAggregator::new(&deals, &targets, &dir);
    agg.resolve_effective_user_set(viewer, scope, &team)
}

fn viewer(uid: &str) -> User {
    directory().get(uid).cloned().unwrap()
}

#[test]
fn director_sees_all_sales_staff() {
    let uids = resolve(&viewer("d1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["a1", "e1", "e2", "h1", "m1", "m2"]);
}

#[test]
fn admin_sees_the_same_set_as_director() {
    let uids = resolve(&viewer("adm"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["a1", "e1", "e2", "h1", "m1", "m2"]);
}

#[test]
fn head_sees_sales_managers() {
    let uids = resolve(&viewer("h1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["m1", "m2"]);
}

#[test]
fn head_drilling_into_a_manager_gets_the_manager_and_their_reports() {
    let uids = resolve(
        &viewer("h1"),
        ViewScope::Team,
        TeamSelection::User("m1".to_string()),
    );
    assert_eq!(uids, vec!["a1", "e1", "m1"]);
}

#[test]
fn head_selecting_a_non_manager_narrows_to_that_user() {
    let uids = resolve(
        &viewer("h1"),
        ViewScope::Team,
        TeamSelection::User("e2".to_string()),
    );
    assert_eq!(uids, vec!["e2"]);
}

#[test]
fn manager_sees_self_plus_direct_reports() {
    let uids = resolve(&viewer("m1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["a1", "e1", "m1"]);

    // A manager with no reports is just themselves.
    let uids = resolve(&viewer("hr1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["hr1"]);
}

#[test]
fn my_leads_only_narrows_any_role_to_self() {
    let uids = resolve(&viewer("m1"), ViewScope::MyLeadsOnly, TeamSelection::All);
    assert_eq!(uids, vec!["m1"]);
}

#[test]
fn individual_contributors_are_always_pinned_to_self() {
    // Whatever scope or drill-down an Executive asks for, they get themselves.
    let uids = resolve(&viewer("e1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["e1"]);

    let uids = resolve(
        &viewer("e1"),
        ViewScope::Team,
        TeamSelection::User("m1".to_string()),
    );
    assert_eq!(uids, vec!["e1"]);

    let uids = resolve(&viewer("a1"), ViewScope::Team, TeamSelection::All);
    assert_eq!(uids, vec!["a1"]);
}

#[test]
fn explicit_selection_overrides_group_resolution() {
    let uids = resolve(
        &viewer("d1"),
        ViewScope::Team,
        TeamSelection::User("e2".to_string()),
    );
    assert_eq!(uids, vec!["e2"]);
}

#[test]
fn team_selection_parse_treats_all_as_group() {
    assert_eq!(TeamSelection::parse(None), TeamSelection::All);
    assert_eq!(TeamSelection::parse(Some("all")), TeamSelection::All);
    assert_eq!(TeamSelection::parse(Some("ALL")), TeamSelection::All);
    assert_eq!(TeamSelection::parse(Some("")), TeamSelection::All);
    assert_eq!(
        TeamSelection::parse(Some("u42")),
        TeamSelection::User("u42".to_string())
    );
}
