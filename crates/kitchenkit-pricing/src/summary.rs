//! Count of placed instances by title, priced or not.

use serde::Serialize;

use kitchenkit_core::constants::DEFAULT_MODULE_TITLE;
use kitchenkit_layout::ModuleInstance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCount {
    pub title: String,
    pub count: usize,
}

/// Instances grouped by trimmed title, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TitleSummary {
    pub entries: Vec<TitleCount>,
    pub total: usize,
}

impl TitleSummary {
    pub fn count_of(&self, title: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.count)
            .unwrap_or(0)
    }
}

pub fn summarize_titles(instances: &[ModuleInstance]) -> TitleSummary {
    let mut entries: Vec<TitleCount> = Vec::new();
    for instance in instances {
        let title = match instance.title.trim() {
            "" => DEFAULT_MODULE_TITLE,
            t => t,
        };
        match entries.iter_mut().find(|e| e.title == title) {
            Some(entry) => entry.count += 1,
            None => entries.push(TitleCount {
                title: title.to_string(),
                count: 1,
            }),
        }
    }
    TitleSummary {
        total: instances.len(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchenkit_layout::Rect;

    fn titled(title: &str, x: i32) -> ModuleInstance {
        ModuleInstance::new("bm", title, Rect::new(x, 0, 10, 10))
    }

    #[test]
    fn test_groups_trimmed_titles_in_order() {
        let summary = summarize_titles(&[
            titled("Fridge", 0),
            titled(" Base ", 10),
            titled("Base", 20),
            titled("  ", 30),
        ]);
        let titles: Vec<_> = summary.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Fridge", "Base", "Module"]);
        assert_eq!(summary.count_of("Base"), 2);
        assert_eq!(summary.count_of("Sink"), 0);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_empty() {
        let summary = summarize_titles(&[]);
        assert!(summary.entries.is_empty());
        assert_eq!(summary.total, 0);
    }
}
