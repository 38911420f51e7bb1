use super::*;
use crate::api::fake::{self, FakeApi, DEPTH};
use serde_json::json;

fn space(label: &str, id: &str) -> SpaceTarget {
    SpaceTarget {
        label: label.to_string(),
        url: format!("https://app.clickup.com/1/v/s/{id}"),
        space_id: id.to_string(),
    }
}

fn options(pass: Pass) -> SweepOptions {
    SweepOptions {
        pass,
        delete_empty_lists: true,
        depth_field: DEPTH.to_string(),
    }
}

fn fixture() -> FakeApi {
    let parent_list = fake::list("lp", r"Root\Proj\\", "f1");
    let child_list = fake::list("lc", r"Root\Proj\Task\", "f1");
    let mut api = FakeApi::default();
    api.add_folder("s1", fake::folder("f1", "Imported"));
    api.add_list("f1", parent_list.clone());
    api.add_list("f1", child_list.clone());
    api.add_task(&parent_list, fake::task("p", "Task", Some(6)));
    api.add_task(
        &child_list,
        fake::with_field(fake::task("c", "Child", Some(7)), "M Starred", json!("Y")),
    );
    api
}

#[test]
fn pass_parsing_and_selection() {
    assert_eq!("link".parse::<Pass>().unwrap(), Pass::Link);
    assert_eq!(" ALL ".parse::<Pass>().unwrap(), Pass::All);
    assert!("both".parse::<Pass>().is_err());
    assert_eq!(Pass::default(), Pass::Status);
    assert!(Pass::All.links() && Pass::All.statuses());
    assert!(!Pass::Status.links());
    assert!(!Pass::Link.statuses());
    assert_eq!(Pass::Link.to_string(), "link");
}

#[test]
fn status_pass_only_touches_statuses() {
    let report = Sweeper::new(fixture(), options(Pass::Status)).run(&[space("Work", "s1")]);
    assert!(report.is_clean());
    assert_eq!(report.folders, 1);
    assert_eq!(report.link.tasks_linked, 0);
    assert_eq!(report.status.tasks_updated, 1);
    assert_eq!(report.status.lists, 2);
}

#[test]
fn all_pass_links_then_updates() {
    let sweeper = Sweeper::new(fixture(), options(Pass::All));
    let report = sweeper.run(&[space("Work", "s1")]);
    assert!(report.is_clean());
    assert_eq!(report.link.tasks_linked, 1);
    assert_eq!(report.status.tasks_updated, 1);
    let updates = sweeper.api().updates();
    assert_eq!(updates[0].1.parent.as_deref(), Some("p"));
    assert_eq!(updates[1].1.priority, Some(1));
}

#[test]
fn failing_space_does_not_stop_the_sweep() {
    let report = Sweeper::new(fixture(), options(Pass::Status))
        .run(&[space("Missing", "nope"), space("Work", "s1")]);
    assert_eq!(report.spaces, 2);
    assert_eq!(report.spaces_failed, 1);
    assert_eq!(report.status.tasks_updated, 1);
    assert!(!report.is_clean());
}

#[test]
fn aborted_sweep_reports_partial_progress() {
    let abort = AbortToken::new();
    abort.request_abort();
    let report = Sweeper::new(fixture(), options(Pass::All))
        .with_abort(abort)
        .run(&[space("Work", "s1"), space("Other", "s2")]);
    assert!(report.aborted);
    assert_eq!(report.spaces, 1);
    assert_eq!(report.spaces_failed, 0);
    assert!(report.to_string().contains("aborted"));
}
