// src/core/preview.rs
//! Preview renderer - maps a record and a layout to a visual tree

use crate::core::html::{Element, Node};
use crate::core::layout::{Arrangement, Layout, LayoutStyles};
use crate::types::{Education, Experience, PersonalDetails, ResumeData};

pub const CONTACT_SEPARATOR: &str = " | ";

/// Element id of the preview root, targeted by the editor page and the export step.
pub const PREVIEW_ROOT_ID: &str = "resume-preview";

/// Non-empty contact fields in display order: email, phone, location, website.
pub fn contact_parts(personal: &PersonalDetails) -> Vec<&str> {
    [
        personal.email.as_str(),
        personal.phone.as_str(),
        personal.location.as_str(),
        personal.website.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect()
}

pub fn contact_line(personal: &PersonalDetails) -> String {
    contact_parts(personal).join(CONTACT_SEPARATOR)
}

/// Bullet lines of a multi-line description. Blank lines are dropped and a
/// leading "- " marker is stripped where present.
pub fn description_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
        .collect()
}

fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render the full preview tree for `record` in `layout`.
pub fn render_preview(record: &ResumeData, layout: Layout) -> Node {
    let s = layout.styles();

    let root = Node::el(
        "div",
        format!("w-full max-w-[800px] mx-auto shadow-2xl {}", s.container),
    )
    .attr("id", PREVIEW_ROOT_ID)
    .attr("style", "aspect-ratio: 1 / 1.414")
    .child(header(&record.personal, s));

    let body = Node::el("div", s.body);
    let body = match layout.arrangement() {
        Arrangement::TwoColumn => {
            let mut left = Node::el("div", s.left_col)
                .child(skills_section(record, s, ""))
                .child(education_section(&record.education, s, "mt-6", false));
            if layout == Layout::Creative {
                left = left.child(contact_section(&record.personal, s));
            }

            let mut right = Node::el("div", s.right_col)
                .child(summary_section(&record.summary, s, ""))
                .child(experience_section(&record.experience, s, "mt-6"));
            if let Some(achievements) = achievements_section(record, s) {
                right = right.child(achievements);
            }

            body.child(left).child(right)
        }
        Arrangement::Stacked => {
            let body = body
                .child(summary_section(&record.summary, s, ""))
                .child(experience_section(&record.experience, s, ""))
                .child(education_section(&record.education, s, "", true))
                .child(skills_section(record, s, ""));
            match achievements_section(record, s) {
                Some(achievements) => body.child(achievements),
                None => body,
            }
        }
    };

    root.child(body).into()
}

fn header(personal: &PersonalDetails, s: &LayoutStyles) -> Element {
    Node::el("div", s.header)
        .child(
            Node::el("div", "")
                .child(Node::el("h2", s.name).text(&personal.name))
                .child(Node::el("p", s.title).text(&personal.title)),
        )
        .child(Node::el("div", s.contact).child(Node::el("span", "").text(contact_line(personal))))
}

fn section(s: &LayoutStyles, class: &str, title: &str) -> Element {
    Node::el("section", class).child(Node::el("h3", s.section_title).text(title))
}

fn summary_section(summary: &str, s: &LayoutStyles, class: &str) -> Element {
    section(s, class, "Summary").child(
        Node::el("p", format!("{} text-gray-700", s.section_content)).text(summary),
    )
}

fn skills_section(record: &ResumeData, s: &LayoutStyles, class: &str) -> Element {
    let chips = record
        .skills
        .iter()
        .map(|skill| Node::from(Node::el("span", s.skill).text(&skill.name)));

    section(s, class, "Skills").child(
        Node::el("div", format!("{} {}", s.section_content, s.skill_list)).children(chips),
    )
}

fn experience_section(items: &[Experience], s: &LayoutStyles, class: &str) -> Element {
    let entries = items.iter().map(|exp| {
        Node::el("div", "mb-5")
            .child(
                Node::el("div", "flex justify-between items-baseline")
                    .child(Node::el("h4", s.item_title).text(&exp.title))
                    .child(
                        Node::el("span", s.item_date)
                            .text(join_present(&[exp.start_date.as_str(), exp.end_date.as_str()], " - ")),
                    ),
            )
            .child(
                Node::el("p", s.item_subtitle)
                    .text(join_present(&[exp.company.as_str(), exp.location.as_str()], CONTACT_SEPARATOR)),
            )
            .child(description_list(&exp.description))
    });

    section(s, class, "Experience")
        .child(Node::el("div", s.section_content).children(entries.map(Node::from)))
}

fn education_section(items: &[Education], s: &LayoutStyles, class: &str, inline_date: bool) -> Element {
    let entries = items.iter().map(|edu| {
        let entry = Node::el("div", "mb-4");
        let entry = if inline_date {
            entry
                .child(
                    Node::el("div", "flex justify-between items-baseline")
                        .child(Node::el("h4", s.item_title).text(&edu.degree))
                        .child(Node::el("p", s.item_date).text(&edu.grad_date)),
                )
                .child(Node::el("p", s.item_subtitle).text(&edu.institution))
        } else {
            entry
                .child(Node::el("h4", s.item_title).text(&edu.degree))
                .child(Node::el("p", s.item_subtitle).text(&edu.institution))
                .child(Node::el("p", s.item_date).text(&edu.grad_date))
        };
        Node::from(entry)
    });

    section(s, class, "Education").child(Node::el("div", s.section_content).children(entries))
}

fn contact_section(personal: &PersonalDetails, s: &LayoutStyles) -> Element {
    let lines = contact_parts(personal)
        .into_iter()
        .map(|part| Node::from(Node::el("p", "").text(part)));

    section(s, "mt-6", "Contact")
        .child(Node::el("div", format!("{} space-y-1", s.section_content)).children(lines))
}

fn achievements_section(record: &ResumeData, s: &LayoutStyles) -> Option<Element> {
    if record.achievements.is_empty() {
        return None;
    }

    let items = record
        .achievements
        .iter()
        .map(|ach| Node::from(Node::el("li", "").text(&ach.description)));

    Some(
        section(s, "mt-6", "Achievements").child(
            Node::el("div", s.section_content)
                .child(Node::el("ul", "list-disc pl-5 space-y-1 text-gray-700").children(items)),
        ),
    )
}

fn description_list(text: &str) -> Element {
    let items = description_lines(text)
        .into_iter()
        .map(|line| Node::from(Node::el("li", "").text(line)));

    Node::el("ul", "list-disc pl-5 mt-2 space-y-1 text-gray-700").children(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Achievement;

    fn section_titles(node: &Node) -> Vec<String> {
        node.find_all("h3")
            .into_iter()
            .map(|h3| Node::Element(h3.clone()).text_content())
            .collect()
    }

    #[test]
    fn test_description_lines() {
        assert_eq!(description_lines("- a\n\nb\n- c"), vec!["a", "b", "c"]);
        assert_eq!(description_lines("-a\n   \n- - b\r\n"), vec!["-a", "- b"]);
        assert!(description_lines("").is_empty());
    }

    #[test]
    fn test_contact_line_skips_empty_fields() {
        let mut personal = ResumeData::demo().personal;
        assert_eq!(
            contact_line(&personal),
            "jane.doe@email.com | (123) 456-7890 | San Francisco, CA | janedoe.dev"
        );

        personal.email.clear();
        personal.location.clear();
        assert_eq!(contact_line(&personal), "(123) 456-7890 | janedoe.dev");

        personal.phone.clear();
        assert_eq!(contact_line(&personal), "janedoe.dev");

        personal.website.clear();
        assert_eq!(contact_line(&personal), "");
    }

    #[test]
    fn test_contact_line_never_dangles() {
        let fields = ["a", ""];
        for email in fields {
            for phone in fields {
                for location in fields {
                    for website in fields {
                        let personal = PersonalDetails {
                            email: email.to_string(),
                            phone: phone.to_string(),
                            location: location.to_string(),
                            website: website.to_string(),
                            ..Default::default()
                        };
                        let line = contact_line(&personal);
                        assert!(!line.starts_with(CONTACT_SEPARATOR.trim_start()));
                        assert!(!line.ends_with(CONTACT_SEPARATOR.trim_end()));
                        assert!(!line.contains("|  |"));
                    }
                }
            }
        }
    }

    #[test]
    fn test_two_column_layout_groups_sections() {
        let tree = render_preview(&ResumeData::demo(), Layout::Modern);
        let root = tree.as_element().unwrap();
        let body = root.children[1].as_element().unwrap();
        assert_eq!(body.children.len(), 2);

        let left = section_titles(&body.children[0]);
        let right = section_titles(&body.children[1]);
        assert_eq!(left, vec!["Skills", "Education"]);
        assert_eq!(right, vec!["Summary", "Experience", "Achievements"]);
    }

    #[test]
    fn test_creative_adds_contact_block() {
        let tree = render_preview(&ResumeData::demo(), Layout::Creative);
        let body = tree.as_element().unwrap().children[1].as_element().unwrap();
        assert_eq!(
            section_titles(&body.children[0]),
            vec!["Skills", "Education", "Contact"]
        );
    }

    #[test]
    fn test_stacked_layout_is_linear() {
        for layout in [Layout::Classic, Layout::Minimal] {
            let tree = render_preview(&ResumeData::demo(), layout);
            assert_eq!(
                section_titles(&tree),
                vec!["Summary", "Experience", "Education", "Skills", "Achievements"]
            );
        }
    }

    #[test]
    fn test_achievements_only_when_present() {
        let mut record = ResumeData::demo();
        record.achievements.clear();

        for layout in Layout::ALL {
            let tree = render_preview(&record, layout);
            assert!(!section_titles(&tree).contains(&"Achievements".to_string()));
        }

        record.achievements.push(Achievement {
            id: "a".to_string(),
            description: "Won".to_string(),
        });
        let tree = render_preview(&record, Layout::Minimal);
        assert!(section_titles(&tree).contains(&"Achievements".to_string()));
    }

    #[test]
    fn test_experience_description_becomes_bullets() {
        let mut record = ResumeData::demo();
        record.experience.truncate(1);
        record.experience[0].description = "- a\n\nb\n- c".to_string();
        record.achievements.clear();

        let tree = render_preview(&record, Layout::Classic);
        let bullets: Vec<String> = tree
            .find_all("li")
            .into_iter()
            .map(|li| Node::Element(li.clone()).text_content())
            .collect();
        assert_eq!(bullets, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_header_and_styles_follow_layout() {
        let tree = render_preview(&ResumeData::demo(), Layout::Minimal);
        let root = tree.as_element().unwrap();
        assert_eq!(root.get_attr("id"), Some(PREVIEW_ROOT_ID));
        assert!(root.class.contains(Layout::Minimal.styles().container));

        let name = tree.find_all("h2")[0];
        assert_eq!(name.class, Layout::Minimal.styles().name);
        assert_eq!(Node::Element(name.clone()).text_content(), "Jane Doe");
    }

    #[test]
    fn test_render_is_pure() {
        let record = ResumeData::demo();
        assert_eq!(
            render_preview(&record, Layout::Creative),
            render_preview(&record, Layout::Creative)
        );
        assert_ne!(
            render_preview(&record, Layout::Creative),
            render_preview(&record, Layout::Modern)
        );
    }
}
