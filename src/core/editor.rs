// src/core/editor.rs
//! Record editor - field updates, entry append and entry removal as pure transformations

use serde::{Deserialize, Serialize};

use crate::types::resume_data::UnknownSection;
use crate::types::{new_entry_id, Entry, ResumeData, Section};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("section '{section}' has no field '{field}'")]
    UnknownField { section: Section, field: String },

    #[error("section '{0}' is a collection, an entry index is required")]
    MissingIndex(Section),

    #[error("index {index} is out of range for '{section}' ({len} entries)")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("section '{0}' is not a collection")]
    NotACollection(Section),
}

impl From<UnknownSection> for EditError {
    fn from(err: UnknownSection) -> Self {
        EditError::UnknownSection(err.0)
    }
}

/// One keystroke-level change coming from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub section: Section,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub value: String,
}

impl FieldEdit {
    pub fn new(section: Section, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section,
            field: field.into(),
            index: None,
            value: value.into(),
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Apply a single field edit.
///
/// `summary` is replaced whole, `personal` gets the one field merged in, and a
/// collection entry at `edit.index` gets the one field merged in. Values are
/// never validated.
pub fn update_field(record: &ResumeData, edit: &FieldEdit) -> Result<ResumeData, EditError> {
    let mut next = record.clone();
    let value = edit.value.clone();

    match edit.section {
        Section::Summary => next.summary = value,
        Section::Personal => {
            let slot = next
                .personal
                .field_mut(&edit.field)
                .ok_or_else(|| EditError::UnknownField {
                    section: Section::Personal,
                    field: edit.field.clone(),
                })?;
            *slot = value;
        }
        Section::Experience => {
            next.experience = update_entry(&record.experience, edit.index, &edit.field, value)?
        }
        Section::Education => {
            next.education = update_entry(&record.education, edit.index, &edit.field, value)?
        }
        Section::Skills => {
            next.skills = update_entry(&record.skills, edit.index, &edit.field, value)?
        }
        Section::Achievements => {
            next.achievements =
                update_entry(&record.achievements, edit.index, &edit.field, value)?
        }
    }

    Ok(next)
}

/// Append a blank entry to a collection section. Returns the new record and
/// the identifier of the appended entry.
pub fn add_entry(record: &ResumeData, section: Section) -> Result<(ResumeData, String), EditError> {
    let mut next = record.clone();

    let id = match section {
        Section::Experience => append_blank(&mut next.experience),
        Section::Education => append_blank(&mut next.education),
        Section::Skills => append_blank(&mut next.skills),
        Section::Achievements => append_blank(&mut next.achievements),
        Section::Personal | Section::Summary => return Err(EditError::NotACollection(section)),
    };

    Ok((next, id))
}

/// Drop the entry with identifier `id`. Absent identifiers are a no-op.
pub fn remove_entry(record: &ResumeData, section: Section, id: &str) -> Result<ResumeData, EditError> {
    let mut next = record.clone();

    match section {
        Section::Experience => next.experience = remove_by_id(&record.experience, id),
        Section::Education => next.education = remove_by_id(&record.education, id),
        Section::Skills => next.skills = remove_by_id(&record.skills, id),
        Section::Achievements => next.achievements = remove_by_id(&record.achievements, id),
        Section::Personal | Section::Summary => return Err(EditError::NotACollection(section)),
    }

    Ok(next)
}

fn update_entry<T: Entry>(
    items: &[T],
    index: Option<usize>,
    field: &str,
    value: String,
) -> Result<Vec<T>, EditError> {
    let index = index.ok_or(EditError::MissingIndex(T::SECTION))?;
    let mut next = items.to_vec();

    let entry = next.get_mut(index).ok_or(EditError::IndexOutOfRange {
        section: T::SECTION,
        index,
        len: items.len(),
    })?;

    let slot = entry.field_mut(field).ok_or_else(|| EditError::UnknownField {
        section: T::SECTION,
        field: field.to_string(),
    })?;
    *slot = value;

    Ok(next)
}

fn append_blank<T: Entry>(items: &mut Vec<T>) -> String {
    let id = new_entry_id();
    items.push(T::blank(id.clone()));
    id
}

fn remove_by_id<T: Entry>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_summary_is_replaced_whole() {
        let record = ResumeData::demo();
        let next = update_field(&record, &FieldEdit::new(Section::Summary, "summary", "")).unwrap();
        assert_eq!(next.summary, "");
        assert_eq!(next.personal, record.personal);
    }

    #[test]
    fn test_personal_field_merges_and_keeps_siblings() {
        let record = ResumeData::demo();

        for field in ["name", "title", "email", "phone", "location", "website"] {
            let next =
                update_field(&record, &FieldEdit::new(Section::Personal, field, "V")).unwrap();

            let mut expected = record.personal.clone();
            *expected.field_mut(field).unwrap() = "V".to_string();
            assert_eq!(next.personal, expected, "field {}", field);
            assert_eq!(next.experience, record.experience);
        }
    }

    #[test]
    fn test_collection_field_merges_into_indexed_entry_only() {
        let record = ResumeData::demo();
        let edit = FieldEdit::new(Section::Experience, "company", "Acme").at(1);

        let next = update_field(&record, &edit).unwrap();

        assert_eq!(next.experience[0], record.experience[0]);
        assert_eq!(next.experience[1].company, "Acme");
        assert_eq!(next.experience[1].title, record.experience[1].title);
        assert_eq!(next.experience[1].id, record.experience[1].id);
    }

    #[test]
    fn test_any_string_is_accepted() {
        let record = ResumeData::demo();
        let edit = FieldEdit::new(Section::Education, "gradDate", "not a date <b>").at(0);
        let next = update_field(&record, &edit).unwrap();
        assert_eq!(next.education[0].grad_date, "not a date <b>");
    }

    #[test]
    fn test_update_errors_leave_record_untouched() {
        let record = ResumeData::demo();

        let missing = FieldEdit::new(Section::Skills, "name", "x");
        assert_eq!(
            update_field(&record, &missing),
            Err(EditError::MissingIndex(Section::Skills))
        );

        let out_of_range = FieldEdit::new(Section::Skills, "name", "x").at(8);
        assert_eq!(
            update_field(&record, &out_of_range),
            Err(EditError::IndexOutOfRange {
                section: Section::Skills,
                index: 8,
                len: 8
            })
        );

        let unknown = FieldEdit::new(Section::Personal, "linkedin", "x");
        assert!(matches!(
            update_field(&record, &unknown),
            Err(EditError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_add_entry_appends_blank_with_unique_id() {
        let mut record = ResumeData::demo();

        for _ in 0..5 {
            let before = record.education.len();
            let (next, id) = add_entry(&record, Section::Education).unwrap();

            assert_eq!(next.education.len(), before + 1);
            let last = next.education.last().unwrap();
            assert_eq!(last.id, id);
            assert!(last.degree.is_empty() && last.institution.is_empty());
            assert!(record.education.iter().all(|e| e.id != id));
            record = next;
        }

        let ids: HashSet<_> = record.education.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), record.education.len());
    }

    #[test]
    fn test_add_entry_shapes_per_section() {
        let record = ResumeData::default();

        let (next, _) = add_entry(&record, Section::Experience).unwrap();
        assert!(next.experience[0].description.is_empty());
        let (next, _) = add_entry(&next, Section::Skills).unwrap();
        assert!(next.skills[0].name.is_empty());
        let (next, _) = add_entry(&next, Section::Achievements).unwrap();
        assert_eq!(next.achievements.len(), 1);

        assert_eq!(
            add_entry(&next, Section::Summary),
            Err(EditError::NotACollection(Section::Summary))
        );
    }

    #[test]
    fn test_remove_entry_by_id() {
        let record = ResumeData::demo();

        let next = remove_entry(&record, Section::Skills, "skill3").unwrap();
        assert_eq!(next.skills.len(), record.skills.len() - 1);
        assert!(next.skills.iter().all(|s| s.id != "skill3"));
        assert_eq!(next.skills[2].id, "skill4");

        let same = remove_entry(&record, Section::Skills, "nope").unwrap();
        assert_eq!(same, record);
    }
}
