use crate::error::{PlannerError, Result};
use crate::types::{Category, Label};
use serde::Deserialize;

/// Partial update for a label; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub category: Option<Category>,
}

// ---------------------------------------------------------------------------
// Registry operations (operate on the ordered Vec<Label> of the document)
// ---------------------------------------------------------------------------

pub fn add_label(
    labels: &mut Vec<Label>,
    name: impl Into<String>,
    color: impl Into<String>,
    category: Category,
) -> Label {
    let label = Label {
        id: uuid::Uuid::new_v4().simple().to_string(),
        name: name.into(),
        color: color.into(),
        category,
    };
    labels.push(label.clone());
    label
}

/// Apply `update` to the label `id`. Changing the color does not touch week
/// statuses: weeks still holding the old color become orphaned.
pub fn update_label(labels: &mut [Label], id: &str, update: LabelUpdate) -> Result<Label> {
    let label = find_mut(labels, id)?;
    if let Some(name) = update.name {
        label.name = name;
    }
    if let Some(color) = update.color {
        label.color = color;
    }
    if let Some(category) = update.category {
        label.category = category;
    }
    Ok(label.clone())
}

/// Remove the label `id` and return it. The caller is responsible for the
/// week-status cascade keyed by the returned label's color.
pub fn remove_label(labels: &mut Vec<Label>, id: &str) -> Result<Label> {
    let pos = labels
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| PlannerError::LabelNotFound(id.to_string()))?;
    Ok(labels.remove(pos))
}

/// Labels of one category in registry order; this is the cycling order.
pub fn labels_for(labels: &[Label], category: Category) -> Vec<&Label> {
    labels.iter().filter(|l| l.category == category).collect()
}

/// First label of `category` whose color is `color`.
pub fn label_for_color<'a>(labels: &'a [Label], category: Category, color: &str) -> Option<&'a Label> {
    labels
        .iter()
        .find(|l| l.category == category && l.color == color)
}

/// Colors used by more than one label of the same category. Cycling treats
/// such labels as one, so these are worth surfacing to the user.
pub fn duplicate_colors(labels: &[Label]) -> Vec<(Category, String)> {
    let mut seen = std::collections::HashSet::new();
    let mut dups = Vec::new();
    for l in labels {
        let key = (l.category, l.color.clone());
        if !seen.insert(key.clone()) && !dups.contains(&key) {
            dups.push(key);
        }
    }
    dups
}

fn find_mut<'a>(labels: &'a mut [Label], id: &str) -> Result<&'a mut Label> {
    labels
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| PlannerError::LabelNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_unique_ids_in_order() {
        let mut labels = Vec::new();
        let a = add_label(&mut labels, "Planned", "#60a5fa", Category::Content);
        let b = add_label(&mut labels, "Recorded", "#34d399", Category::Content);
        assert_ne!(a.id, b.id);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], a);
        assert_eq!(labels[1], b);
    }

    #[test]
    fn update_is_partial() {
        let mut labels = Vec::new();
        let a = add_label(&mut labels, "Planned", "#60a5fa", Category::Content);
        let updated = update_label(
            &mut labels,
            &a.id,
            LabelUpdate {
                name: Some("Scheduled".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Scheduled");
        assert_eq!(updated.color, "#60a5fa");
        assert_eq!(updated.category, Category::Content);

        update_label(
            &mut labels,
            &a.id,
            LabelUpdate {
                category: Some(Category::Music),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(labels[0].category, Category::Music);
        assert_eq!(labels[0].name, "Scheduled");
    }

    #[test]
    fn update_missing_label() {
        let mut labels = Vec::new();
        assert!(matches!(
            update_label(&mut labels, "nope", LabelUpdate::default()),
            Err(PlannerError::LabelNotFound(_))
        ));
    }

    #[test]
    fn remove_returns_label_once() {
        let mut labels = Vec::new();
        let a = add_label(&mut labels, "Planned", "#60a5fa", Category::Content);
        let removed = remove_label(&mut labels, &a.id).unwrap();
        assert_eq!(removed, a);
        assert!(labels.is_empty());
        assert!(matches!(
            remove_label(&mut labels, &a.id),
            Err(PlannerError::LabelNotFound(_))
        ));
    }

    #[test]
    fn filter_by_category_keeps_order() {
        let mut labels = Vec::new();
        add_label(&mut labels, "A", "#1", Category::Content);
        add_label(&mut labels, "B", "#2", Category::Music);
        add_label(&mut labels, "C", "#3", Category::Content);
        let names: Vec<&str> = labels_for(&labels, Category::Content)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn color_lookup_prefers_first_match() {
        let mut labels = Vec::new();
        add_label(&mut labels, "First", "#1", Category::Content);
        add_label(&mut labels, "Dup", "#1", Category::Content);
        add_label(&mut labels, "Other", "#1", Category::Music);
        let found = label_for_color(&labels, Category::Content, "#1").unwrap();
        assert_eq!(found.name, "First");
        assert!(label_for_color(&labels, Category::Content, "#9").is_none());

        assert_eq!(
            duplicate_colors(&labels),
            vec![(Category::Content, "#1".to_string())]
        );
    }
}
