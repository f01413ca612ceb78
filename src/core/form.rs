// src/core/form.rs
//! Form binding - projects the record onto flat, labelled input fields.
//!
//! Each field carries the `(section, field, index)` key the record editor
//! expects, so a submitted value goes straight back through `update_field`.

use serde::Serialize;

use crate::types::{ResumeData, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    TextArea { rows: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub label: &'static str,
    pub section: Section,
    pub field: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub value: String,
    pub input: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

/// Inputs belonging to one collection entry, or the single group of a
/// non-collection section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub title: &'static str,
    pub section: Section,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_label: Option<&'static str>,
    pub groups: Vec<FieldGroup>,
}

struct FieldSpec {
    label: &'static str,
    field: &'static str,
    input: InputKind,
    placeholder: Option<&'static str>,
}

const fn text(label: &'static str, field: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        field,
        input: InputKind::Text,
        placeholder: None,
    }
}

const fn hinted(label: &'static str, field: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        field,
        input: InputKind::Text,
        placeholder: Some(placeholder),
    }
}

const PERSONAL_FIELDS: [FieldSpec; 6] = [
    text("Full Name", "name"),
    hinted("Job Title", "title", "e.g., Senior Frontend Developer"),
    FieldSpec {
        label: "Email",
        field: "email",
        input: InputKind::Email,
        placeholder: None,
    },
    text("Phone Number", "phone"),
    hinted("Location", "location", "e.g., San Francisco, CA"),
    hinted("Website / Portfolio", "website", "e.g., janedoe.dev"),
];

const SUMMARY_FIELD: FieldSpec = FieldSpec {
    label: "Summary",
    field: "summary",
    input: InputKind::TextArea { rows: 5 },
    placeholder: Some("Write a brief summary about yourself..."),
};

const EXPERIENCE_FIELDS: [FieldSpec; 6] = [
    text("Job Title", "title"),
    text("Company", "company"),
    text("Location", "location"),
    text("Start Date", "startDate"),
    text("End Date", "endDate"),
    FieldSpec {
        label: "Description",
        field: "description",
        input: InputKind::TextArea { rows: 4 },
        placeholder: Some("Describe your responsibilities and achievements..."),
    },
];

const EDUCATION_FIELDS: [FieldSpec; 4] = [
    text("Degree / Field of Study", "degree"),
    text("Institution", "institution"),
    text("Location", "location"),
    text("Graduation Date", "gradDate"),
];

const SKILL_FIELDS: [FieldSpec; 1] = [text("", "name")];
const ACHIEVEMENT_FIELDS: [FieldSpec; 1] = [text("", "description")];

fn bind(section: Section, spec: &FieldSpec, index: Option<usize>, value: &str) -> FormField {
    FormField {
        label: spec.label,
        section,
        field: spec.field,
        index,
        value: value.to_string(),
        input: spec.input,
        placeholder: spec.placeholder,
    }
}

fn entry_group(
    section: Section,
    specs: &[FieldSpec],
    index: usize,
    id: &str,
    values: &[&str],
) -> FieldGroup {
    FieldGroup {
        entry_id: Some(id.to_string()),
        fields: specs
            .iter()
            .zip(values)
            .map(|(spec, value)| bind(section, spec, Some(index), value))
            .collect(),
    }
}

/// Build the editor form for the current record, in display order.
pub fn build_form(record: &ResumeData) -> Vec<FormSection> {
    let personal = &record.personal;
    let personal_values = [
        personal.name.as_str(),
        &personal.title,
        &personal.email,
        &personal.phone,
        &personal.location,
        &personal.website,
    ];

    vec![
        FormSection {
            title: "Personal Details",
            section: Section::Personal,
            add_label: None,
            groups: vec![FieldGroup {
                entry_id: None,
                fields: PERSONAL_FIELDS
                    .iter()
                    .zip(personal_values)
                    .map(|(spec, value)| bind(Section::Personal, spec, None, value))
                    .collect(),
            }],
        },
        FormSection {
            title: "Professional Summary",
            section: Section::Summary,
            add_label: None,
            groups: vec![FieldGroup {
                entry_id: None,
                fields: vec![bind(Section::Summary, &SUMMARY_FIELD, None, &record.summary)],
            }],
        },
        FormSection {
            title: "Work Experience",
            section: Section::Experience,
            add_label: Some("Add Experience"),
            groups: record
                .experience
                .iter()
                .enumerate()
                .map(|(i, exp)| {
                    entry_group(
                        Section::Experience,
                        &EXPERIENCE_FIELDS,
                        i,
                        &exp.id,
                        &[
                            &exp.title,
                            &exp.company,
                            &exp.location,
                            &exp.start_date,
                            &exp.end_date,
                            &exp.description,
                        ],
                    )
                })
                .collect(),
        },
        FormSection {
            title: "Education",
            section: Section::Education,
            add_label: Some("Add Education"),
            groups: record
                .education
                .iter()
                .enumerate()
                .map(|(i, edu)| {
                    entry_group(
                        Section::Education,
                        &EDUCATION_FIELDS,
                        i,
                        &edu.id,
                        &[&edu.degree, &edu.institution, &edu.location, &edu.grad_date],
                    )
                })
                .collect(),
        },
        FormSection {
            title: "Skills",
            section: Section::Skills,
            add_label: Some("Add Skill"),
            groups: record
                .skills
                .iter()
                .enumerate()
                .map(|(i, skill)| entry_group(Section::Skills, &SKILL_FIELDS, i, &skill.id, &[&skill.name]))
                .collect(),
        },
        FormSection {
            title: "Achievements / Awards",
            section: Section::Achievements,
            add_label: Some("Add Achievement"),
            groups: record
                .achievements
                .iter()
                .enumerate()
                .map(|(i, ach)| {
                    entry_group(
                        Section::Achievements,
                        &ACHIEVEMENT_FIELDS,
                        i,
                        &ach.id,
                        &[&ach.description],
                    )
                })
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::{update_field, FieldEdit};

    #[test]
    fn test_sections_in_display_order() {
        let form = build_form(&ResumeData::demo());
        let sections: Vec<Section> = form.iter().map(|s| s.section).collect();
        assert_eq!(sections, Section::ALL.to_vec());
    }

    #[test]
    fn test_one_group_per_entry() {
        let record = ResumeData::demo();
        let form = build_form(&record);

        let skills = &form[4];
        assert_eq!(skills.groups.len(), record.skills.len());
        assert_eq!(skills.groups[0].entry_id.as_deref(), Some("skill1"));
        assert_eq!(skills.add_label, Some("Add Skill"));

        let experience = &form[2];
        assert_eq!(experience.groups[1].fields.len(), 6);
        assert!(experience.groups[1].fields.iter().all(|f| f.index == Some(1)));
    }

    #[test]
    fn test_personal_fields_carry_labels_and_kinds() {
        let form = build_form(&ResumeData::demo());
        let fields = &form[0].groups[0].fields;

        let email = fields.iter().find(|f| f.field == "email").unwrap();
        assert_eq!(email.input, InputKind::Email);
        assert_eq!(email.index, None);

        let website = fields.iter().find(|f| f.field == "website").unwrap();
        assert_eq!(website.placeholder, Some("e.g., janedoe.dev"));
    }

    #[test]
    fn test_every_field_key_is_accepted_by_the_editor() {
        let record = ResumeData::demo();

        for section in build_form(&record) {
            for group in section.groups {
                for field in group.fields {
                    let mut edit = FieldEdit::new(field.section, field.field, "changed");
                    edit.index = field.index;
                    let next = update_field(&record, &edit).unwrap();
                    assert_ne!(next, record, "{}.{} had no effect", field.section, field.field);
                }
            }
        }
    }

    #[test]
    fn test_empty_collections_have_no_groups() {
        let form = build_form(&ResumeData::default());
        assert!(form[5].groups.is_empty());
        assert_eq!(form[0].groups.len(), 1);
    }
}
