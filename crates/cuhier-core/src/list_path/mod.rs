//! Parsing of the backslash-encoded paths carried in list names.
//!
//! Imported lists are named after the path of the tasks they hold, one path
//! component per `\`. A task at nesting level `n` lives in a list whose name
//! ends in a run of backslashes; its parent's name and the list holding the
//! parent are recovered by splitting that name from the right.
//!
//! All functions here are pure; the API lookups built on them live in
//! [`crate::hierarchy`].


/// Path component separator inside list names.
pub const SEPARATOR: char = '\\';

/// Name of the root list (three backslashes).
pub const ROOT_LIST_NAME: &str = "\\\\\\";

/// Shallowest level that is linked to a parent.
pub const MIN_LEVEL: u32 = 5;

/// Deepest level the linking pass looks at.
pub const MAX_LEVEL: u32 = 11;

/// Levels in processing order: deepest first.
pub fn levels() -> impl Iterator<Item = u32> {
    (MIN_LEVEL..=MAX_LEVEL).rev()
}

pub fn backslash_count(name: &str) -> usize {
    name.chars().filter(|c| *c == SEPARATOR).count()
}

pub fn is_root_list(name: &str) -> bool {
    name == ROOT_LIST_NAME
}

/// Splits `name` on `\` from the right, at most `max_splits` times.
/// Parts are returned leftmost first, so `parts[0]` keeps any unsplit prefix.
pub fn rsplit_parts(name: &str, max_splits: usize) -> Vec<&str> {
    let mut parts: Vec<&str> = name.rsplitn(max_splits + 1, SEPARATOR).collect();
    parts.reverse();
    parts
}

/// Number of right splits needed to isolate the parent component at `level`.
pub fn base_split_count(level: u32) -> usize {
    if level >= 7 {
        2
    } else {
        (8 - level as usize) + 1
    }
}

/// An empty list may be removed when its name has 4–7 backslashes, or
/// exactly 3 and it is not the root list.
pub fn deletion_candidate(name: &str) -> bool {
    let count = backslash_count(name);
    (4..=7).contains(&count) || (count == 3 && !is_root_list(name))
}

/// Parent task name derived from a list name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentName {
    pub name: String,
    /// The first split produced a blank component; every later split uses
    /// one more separator.
    pub extra_backslash: bool,
    /// Number of parts the final split produced.
    pub part_count: usize,
}

/// Derives the parent task name for a task at `level` in list `list_name`.
///
/// Level 5 takes the leftmost part; deeper levels take the second part.
/// Returns `None` when the name has too few components.
pub fn parent_task_name(list_name: &str, level: u32) -> Option<ParentName> {
    let pick = |parts: &[&str]| -> Option<String> {
        let part = if level == MIN_LEVEL {
            parts.first()
        } else {
            parts.get(1)
        };
        part.map(|s| s.to_string())
    };

    let mut split = base_split_count(level);
    let mut extra_backslash = false;
    let first = pick(&rsplit_parts(list_name, split))?;
    if first.trim().is_empty() {
        split += 1;
        extra_backslash = true;
        tracing::info!(
            "parent task name is empty, trying to split with {} backslashes",
            split
        );
    }

    let parts = rsplit_parts(list_name, split);
    let name = pick(&parts)?;
    Some(ParentName {
        name,
        extra_backslash,
        part_count: parts.len(),
    })
}

/// One candidate location for an ancestor of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorProbe {
    /// Effective level this probe was built for.
    pub level: u32,
    /// Name of the list expected to hold the parent task.
    pub parent_list_name: String,
    /// At level 5 the candidate's own parent must carry this name.
    pub grandparent_task_name: Option<String>,
    /// Levels 8 and deeper also try the list name with one more backslash.
    pub fallback_list_name: Option<String>,
}

/// Walks ancestor probes from the task's level up towards level 5.
///
/// Each step widens the split by one and lowers the effective level by one.
/// The walk ends below level 5, or when the previous split produced fewer
/// than three parts.
#[derive(Debug, Clone)]
pub struct AncestorWalk<'a> {
    list_name: &'a str,
    level: u32,
    split_increment: usize,
    extra_backslash: bool,
    prev_part_count: usize,
}

pub fn ancestors<'a>(list_name: &'a str, level: u32, parent: &ParentName) -> AncestorWalk<'a> {
    AncestorWalk {
        list_name,
        level,
        split_increment: 0,
        extra_backslash: parent.extra_backslash,
        prev_part_count: parent.part_count,
    }
}

impl Iterator for AncestorWalk<'_> {
    type Item = AncestorProbe;

    fn next(&mut self) -> Option<AncestorProbe> {
        if self.level < MIN_LEVEL || self.prev_part_count < 3 {
            return None;
        }

        let split = probe_split(self.level, self.split_increment, self.extra_backslash);
        self.prev_part_count = rsplit_parts(self.list_name, split).len();

        let probe = ancestor_probe(
            self.list_name,
            self.level,
            self.split_increment,
            self.extra_backslash,
        );
        match probe {
            Some(_) => {
                self.split_increment += 1;
                self.level -= 1;
            }
            None => self.level = 0,
        }
        probe
    }
}

fn probe_split(level: u32, split_increment: usize, extra_backslash: bool) -> usize {
    base_split_count(level) + split_increment + usize::from(extra_backslash)
}

/// Single probe at `level`, splitting `split_increment` more times than the
/// level's base count. `None` when the split lacks the grandparent part.
pub fn ancestor_probe(
    list_name: &str,
    level: u32,
    split_increment: usize,
    extra_backslash: bool,
) -> Option<AncestorProbe> {
    let parts = rsplit_parts(list_name, probe_split(level, split_increment, extra_backslash));
    build_probe(level, &parts, extra_backslash)
}

fn build_probe(level: u32, parts: &[&str], extra_backslash: bool) -> Option<AncestorProbe> {
    let (mut parent_list_name, grandparent_task_name) = if level == MIN_LEVEL {
        let back = if extra_backslash { 4 } else { 3 };
        let idx = parts.len().checked_sub(back)?;
        (
            ROOT_LIST_NAME.to_string(),
            Some(parts.get(idx)?.to_string()),
        )
    } else {
        (format!("{}{}", parts.first()?, SEPARATOR), None)
    };

    if level > MIN_LEVEL && level < 8 {
        for _ in 0..(8 - level) {
            parent_list_name.push(SEPARATOR);
        }
    }

    let fallback_list_name = (level >= 8).then(|| format!("{}{}", parent_list_name, SEPARATOR));

    Some(AncestorProbe {
        level,
        parent_list_name,
        grandparent_task_name,
        fallback_list_name,
    })
}
