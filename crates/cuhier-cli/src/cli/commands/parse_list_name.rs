//! `cuhier parse-list-name` – show how a list name maps to parent tasks, offline.

use cuhier_core::list_path;
use std::fmt::Write;

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Human-readable breakdown of `name` for a task at `level`.
pub fn describe_list_name(name: &str, level: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "list name:          {name}");
    let _ = writeln!(out, "backslashes:        {}", list_path::backslash_count(name));
    let _ = writeln!(out, "root list:          {}", yes_no(list_path::is_root_list(name)));
    let _ = writeln!(
        out,
        "deletion candidate: {}",
        yes_no(list_path::deletion_candidate(name))
    );

    let Some(parent) = list_path::parent_task_name(name, level) else {
        let _ = writeln!(out, "parent task:        none at level {level}");
        return out;
    };
    let _ = writeln!(out, "parent task:        {:?} (level {level})", parent.name);
    if parent.extra_backslash {
        let _ = writeln!(out, "                    blank component; splits widened by one");
    }

    for probe in list_path::ancestors(name, level, &parent) {
        let _ = write!(
            out,
            "probe level {:>2}:     list {:?}",
            probe.level, probe.parent_list_name
        );
        if let Some(gp) = &probe.grandparent_task_name {
            let _ = write!(out, ", grandparent {gp:?}");
        }
        if let Some(fb) = &probe.fallback_list_name {
            let _ = write!(out, ", fallback list {fb:?}");
        }
        out.push('\n');
    }
    out
}

pub fn run_parse_list_name(name: &str, level: u32) {
    print!("{}", describe_list_name(name, level));
}
