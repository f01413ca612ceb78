// src/types/resume_data.rs
//! Resume record shared by the editor, the preview and the augmentation client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::augment::Augmentation;

// ===== Record Structure =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal: PersonalDetails,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub grad_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub description: String,
}

/// Fresh identifier for a collection entry.
pub fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ===== Sections =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Personal,
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Personal,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Achievements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Achievements => "achievements",
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(
            self,
            Section::Experience | Section::Education | Section::Skills | Section::Achievements
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s.trim())
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

// ===== Collection Entries =====

/// Shared shape of the four collection entry kinds.
pub trait Entry: Clone {
    const SECTION: Section;

    fn id(&self) -> &str;

    /// Entry with the given identifier and every other field blank.
    fn blank(id: String) -> Self;

    /// Mutable handle on the named field, `None` when the entry has no such field.
    fn field_mut(&mut self, field: &str) -> Option<&mut String>;
}

impl Entry for Experience {
    const SECTION: Section = Section::Experience;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "title" => Some(&mut self.title),
            "company" => Some(&mut self.company),
            "location" => Some(&mut self.location),
            "startDate" | "start_date" => Some(&mut self.start_date),
            "endDate" | "end_date" => Some(&mut self.end_date),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl Entry for Education {
    const SECTION: Section = Section::Education;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "degree" => Some(&mut self.degree),
            "institution" => Some(&mut self.institution),
            "location" => Some(&mut self.location),
            "gradDate" | "grad_date" => Some(&mut self.grad_date),
            _ => None,
        }
    }
}

impl Entry for Skill {
    const SECTION: Section = Section::Skills;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            _ => None,
        }
    }
}

impl Entry for Achievement {
    const SECTION: Section = Section::Achievements;

    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            description: String::new(),
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl PersonalDetails {
    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "title" => Some(&mut self.title),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "location" => Some(&mut self.location),
            "website" => Some(&mut self.website),
            _ => None,
        }
    }
}

// ===== Record Operations =====

impl ResumeData {
    /// Copy of this record with the generated summary and skills merged in.
    /// Every generated skill gets a fresh identifier; other sections are kept.
    pub fn merge_augmentation(&self, augmentation: &Augmentation) -> ResumeData {
        ResumeData {
            summary: augmentation.summary.clone(),
            skills: augmentation
                .skills
                .iter()
                .map(|name| Skill {
                    id: new_entry_id(),
                    name: name.clone(),
                })
                .collect(),
            ..self.clone()
        }
    }

    /// Fixed demonstration record loaded at startup.
    pub fn demo() -> ResumeData {
        ResumeData {
            personal: PersonalDetails {
                name: "Jane Doe".to_string(),
                title: "Senior Frontend Developer".to_string(),
                email: "jane.doe@email.com".to_string(),
                phone: "(123) 456-7890".to_string(),
                location: "San Francisco, CA".to_string(),
                website: "janedoe.dev".to_string(),
            },
            summary: "Innovative Senior Frontend Developer with 8+ years of experience building and maintaining responsive and scalable web applications. Proficient in React, TypeScript, and modern JavaScript frameworks. Passionate about creating intuitive user interfaces and delivering exceptional user experiences.".to_string(),
            experience: vec![
                Experience {
                    id: "exp1".to_string(),
                    title: "Senior Frontend Developer".to_string(),
                    company: "Tech Solutions Inc.".to_string(),
                    location: "San Francisco, CA".to_string(),
                    start_date: "Jan 2019".to_string(),
                    end_date: "Present".to_string(),
                    description: "- Led the development of a new customer-facing dashboard using React and Redux, resulting in a 20% increase in user engagement.\n- Mentored junior developers and conducted code reviews to ensure code quality and best practices.\n- Collaborated with UX/UI designers to translate wireframes into high-quality, reusable components.".to_string(),
                },
                Experience {
                    id: "exp2".to_string(),
                    title: "Frontend Developer".to_string(),
                    company: "Web Innovators".to_string(),
                    location: "Palo Alto, CA".to_string(),
                    start_date: "Jun 2015".to_string(),
                    end_date: "Dec 2018".to_string(),
                    description: "- Developed and maintained client websites using HTML, CSS, and JavaScript (jQuery, Angular.js).\n- Improved website performance by 30% by optimizing assets and implementing lazy loading.\n- Worked closely with backend developers to integrate APIs and ensure seamless data flow.".to_string(),
                },
            ],
            education: vec![Education {
                id: "edu1".to_string(),
                degree: "B.S. in Computer Science".to_string(),
                institution: "University of California, Berkeley".to_string(),
                location: "Berkeley, CA".to_string(),
                grad_date: "May 2015".to_string(),
            }],
            skills: [
                "React.js",
                "TypeScript",
                "JavaScript (ES6+)",
                "Node.js",
                "Tailwind CSS",
                "GraphQL",
                "Webpack",
                "Jest & RTL",
            ]
            .iter()
            .enumerate()
            .map(|(i, name)| Skill {
                id: format!("skill{}", i + 1),
                name: name.to_string(),
            })
            .collect(),
            achievements: vec![
                Achievement {
                    id: "ach1".to_string(),
                    description: "Speaker at React Conference 2022 on \"State Management at Scale\".".to_string(),
                },
                Achievement {
                    id: "ach2".to_string(),
                    description: "Open Source Contributor to a popular UI component library.".to_string(),
                },
            ],
        }
    }
}
