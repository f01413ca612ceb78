use resume_builder::core::html;
use resume_builder::core::preview::{render_preview, PREVIEW_ROOT_ID};
use resume_builder::core::Layout;
use resume_builder::web::page::editor_page;
use resume_builder::{ResumeData, Session};
use scraper::{Html, Selector};

fn render(record: &ResumeData, layout: Layout) -> Html {
    let root = render_preview(record, layout);
    Html::parse_document(&html::document("Resume", &root, None))
}

fn select(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

fn texts(document: &Html, selector: &str) -> Vec<String> {
    document
        .select(&select(selector))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

#[test]
fn header_shows_name_title_and_contact_line() {
    for layout in Layout::ALL {
        let document = render(&ResumeData::demo(), layout);
        let root = format!("#{}", PREVIEW_ROOT_ID);

        assert_eq!(document.select(&select(&root)).count(), 1, "{}", layout);
        assert_eq!(texts(&document, "h2"), ["Jane Doe"]);
        assert!(texts(&document, "span")
            .contains(&"jane.doe@email.com | (123) 456-7890 | San Francisco, CA | janedoe.dev".to_string()));
    }
}

#[test]
fn section_order_depends_on_arrangement() {
    let modern = texts(&render(&ResumeData::demo(), Layout::Modern), "h3");
    assert_eq!(modern, ["Skills", "Education", "Summary", "Experience", "Achievements"]);

    let creative = texts(&render(&ResumeData::demo(), Layout::Creative), "h3");
    assert_eq!(
        creative,
        ["Skills", "Education", "Contact", "Summary", "Experience", "Achievements"]
    );

    for layout in [Layout::Classic, Layout::Minimal] {
        let stacked = texts(&render(&ResumeData::demo(), layout), "h3");
        assert_eq!(
            stacked,
            ["Summary", "Experience", "Education", "Skills", "Achievements"],
            "{}",
            layout
        );
    }
}

#[test]
fn descriptions_become_bullet_lists() {
    let mut record = ResumeData::demo();
    record.experience.truncate(1);
    record.achievements.clear();
    record.experience[0].description = "- a\n\nb\n- c".to_string();

    let document = render(&record, Layout::Classic);
    assert_eq!(texts(&document, "li"), ["a", "b", "c"]);
}

#[test]
fn achievements_hidden_when_empty() {
    let mut record = ResumeData::demo();
    record.achievements.clear();

    for layout in Layout::ALL {
        let titles = texts(&render(&record, layout), "h3");
        assert!(!titles.contains(&"Achievements".to_string()), "{}", layout);
    }
}

#[test]
fn experience_dates_and_subtitle_skip_empty_parts() {
    let mut record = ResumeData::demo();
    record.experience.truncate(1);
    record.experience[0].end_date.clear();
    record.experience[0].location.clear();

    let document = render(&record, Layout::Minimal);
    let all_text: String = document.root_element().text().collect();
    assert!(all_text.contains("Jan 2019"));
    assert!(!all_text.contains("Jan 2019 -"));
    assert!(all_text.contains("Tech Solutions Inc."));
    assert!(!all_text.contains("Tech Solutions Inc. |"));
}

#[test]
fn editor_page_binds_every_field() {
    let record = ResumeData::demo();
    let document = Html::parse_document(&editor_page(&Session::new(record.clone())));

    // personal 6 + summary 1 + 6 per experience + 4 per education + 1 per skill and achievement
    let expected = 6
        + 1
        + 6 * record.experience.len()
        + 4 * record.education.len()
        + record.skills.len()
        + record.achievements.len();
    assert_eq!(document.select(&select("[data-field]")).count(), expected);

    assert_eq!(document.select(&select("[data-layout]")).count(), 4);
    assert_eq!(document.select(&select("[data-add]")).count(), 4);
    assert_eq!(
        document.select(&select("button[data-remove]")).count(),
        record.experience.len() + record.education.len() + record.skills.len() + record.achievements.len()
    );

    let summary = document
        .select(&select("textarea[data-section=\"summary\"]"))
        .next()
        .unwrap();
    assert_eq!(summary.text().collect::<String>(), record.summary);

    let frame = document.select(&select("iframe#preview-frame")).next().unwrap();
    assert_eq!(frame.value().attr("src"), Some("/api/preview"));
}

#[test]
fn textarea_keeps_leading_newline_after_parsing() {
    let mut session = Session::new(ResumeData::demo());
    session.record.summary = "\nStarts on the second line".to_string();
    session.record.experience[0].description = "\n\n- spaced".to_string();

    let document = Html::parse_document(&editor_page(&session));

    let summary = document
        .select(&select("textarea[data-section=\"summary\"]"))
        .next()
        .unwrap();
    assert_eq!(summary.text().collect::<String>(), "\nStarts on the second line");

    let description = document
        .select(&select("textarea[data-section=\"experience\"][data-index=\"0\"]"))
        .next()
        .unwrap();
    assert_eq!(description.text().collect::<String>(), "\n\n- spaced");
}
