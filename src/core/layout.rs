// src/core/layout.rs
//! Fixed set of resume layouts and their style tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Layout Models =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    Modern,
    Classic,
    Minimal,
    Creative,
}

/// How the body sections are placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Skills and education on the left, summary and experience on the right.
    TwoColumn,
    /// Summary, experience, education, skills, one after another.
    Stacked,
}

/// Class names applied to each part of the preview.
#[derive(Debug, PartialEq, Eq)]
pub struct LayoutStyles {
    pub container: &'static str,
    pub header: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub contact: &'static str,
    pub body: &'static str,
    pub left_col: &'static str,
    pub right_col: &'static str,
    pub section_title: &'static str,
    pub section_content: &'static str,
    pub item_title: &'static str,
    pub item_subtitle: &'static str,
    pub item_date: &'static str,
    pub skill: &'static str,
    pub skill_list: &'static str,
}

const MODERN: LayoutStyles = LayoutStyles {
    container: "font-sans bg-white text-gray-800",
    header: "bg-gray-800 text-white p-8 text-center",
    name: "text-4xl font-bold tracking-wider",
    title: "text-xl font-light text-blue-300 mt-2",
    contact: "flex justify-center space-x-6 mt-4 text-sm text-gray-300",
    body: "p-8 grid grid-cols-3 gap-8",
    left_col: "col-span-2",
    right_col: "col-span-1",
    section_title: "text-xl font-bold text-gray-800 border-b-2 border-blue-500 pb-2 mb-4",
    section_content: "text-sm",
    item_title: "font-bold text-md",
    item_subtitle: "text-gray-600 text-sm",
    item_date: "text-gray-500 text-sm italic",
    skill: "bg-blue-100 text-blue-800 px-3 py-1 rounded-full text-xs",
    skill_list: "flex flex-wrap gap-2",
};

const CLASSIC: LayoutStyles = LayoutStyles {
    container: "font-serif bg-white text-gray-900",
    header: "p-8 text-center border-b-2 border-gray-300",
    name: "text-5xl font-serif tracking-widest",
    title: "text-lg text-gray-600 mt-2 tracking-wider",
    contact: "flex justify-center space-x-6 mt-4 text-sm text-gray-600",
    body: "p-8",
    left_col: "",
    right_col: "",
    section_title: "text-2xl font-serif tracking-wider border-b border-gray-300 pb-1 mb-4 mt-6",
    section_content: "text-sm",
    item_title: "font-bold text-md",
    item_subtitle: "text-gray-700 italic",
    item_date: "text-gray-500 text-sm",
    skill: "mr-2 mb-2 inline-block",
    skill_list: "flex flex-wrap gap-2",
};

const MINIMAL: LayoutStyles = LayoutStyles {
    container: "font-sans bg-white text-gray-700",
    header: "p-8",
    name: "text-3xl font-light",
    title: "text-lg text-gray-500",
    contact: "flex space-x-4 mt-2 text-xs text-gray-500",
    body: "p-8 pt-0",
    left_col: "",
    right_col: "",
    section_title: "text-sm font-bold uppercase tracking-widest text-gray-500 mt-6 mb-2",
    section_content: "text-sm",
    item_title: "font-semibold",
    item_subtitle: "text-gray-600",
    item_date: "text-gray-400 text-xs",
    skill: "text-sm",
    skill_list: "flex flex-wrap gap-2",
};

const CREATIVE: LayoutStyles = LayoutStyles {
    container: "font-sans bg-white text-gray-800",
    header: "p-8 flex items-center justify-between bg-blue-50",
    name: "text-4xl font-extrabold text-blue-800",
    title: "text-xl font-medium text-blue-600",
    contact: "text-right text-xs",
    body: "p-8 grid grid-cols-5 gap-8",
    left_col: "col-span-2 border-r-2 border-blue-100 pr-8",
    right_col: "col-span-3",
    section_title: "text-lg font-bold text-blue-800 mb-3",
    section_content: "text-sm",
    item_title: "font-bold text-md",
    item_subtitle: "text-gray-600",
    item_date: "text-blue-500 text-xs font-semibold",
    skill: "bg-blue-500 text-white px-3 py-1 text-xs rounded-sm",
    skill_list: "space-y-1",
};

impl Layout {
    pub const ALL: [Layout; 4] = [
        Layout::Modern,
        Layout::Classic,
        Layout::Minimal,
        Layout::Creative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Modern => "Modern",
            Layout::Classic => "Classic",
            Layout::Minimal => "Minimal",
            Layout::Creative => "Creative",
        }
    }

    pub fn styles(self) -> &'static LayoutStyles {
        match self {
            Layout::Modern => &MODERN,
            Layout::Classic => &CLASSIC,
            Layout::Minimal => &MINIMAL,
            Layout::Creative => &CREATIVE,
        }
    }

    pub fn arrangement(self) -> Arrangement {
        match self {
            Layout::Modern | Layout::Creative => Arrangement::TwoColumn,
            Layout::Classic | Layout::Minimal => Arrangement::Stacked,
        }
    }

    /// Thumbnail class used by the layout picker.
    pub fn swatch_class(self) -> &'static str {
        match self {
            Layout::Modern => "bg-gray-800",
            Layout::Classic => "border-2 border-gray-300",
            Layout::Minimal => "bg-white border",
            Layout::Creative => "bg-blue-500",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout '{0}', expected one of Modern, Classic, Minimal, Creative")]
pub struct UnknownLayout(pub String);

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim().to_lowercase();
        Layout::ALL
            .into_iter()
            .find(|layout| layout.name().to_lowercase() == requested)
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("modern".parse::<Layout>(), Ok(Layout::Modern));
        assert_eq!("CREATIVE".parse::<Layout>(), Ok(Layout::Creative));
        assert_eq!(" Classic ".parse::<Layout>(), Ok(Layout::Classic));
        assert!("fancy".parse::<Layout>().is_err());
    }

    #[test]
    fn test_arrangements() {
        assert_eq!(Layout::Modern.arrangement(), Arrangement::TwoColumn);
        assert_eq!(Layout::Creative.arrangement(), Arrangement::TwoColumn);
        assert_eq!(Layout::Classic.arrangement(), Arrangement::Stacked);
        assert_eq!(Layout::Minimal.arrangement(), Arrangement::Stacked);
    }

    #[test]
    fn test_stacked_layouts_have_no_columns() {
        for layout in Layout::ALL {
            let styles = layout.styles();
            let stacked = layout.arrangement() == Arrangement::Stacked;
            assert_eq!(styles.left_col.is_empty(), stacked, "{}", layout);
            assert!(!styles.section_title.is_empty());
        }
    }

    #[test]
    fn test_default_is_modern() {
        assert_eq!(Layout::default(), Layout::Modern);
        assert_eq!(serde_json::to_string(&Layout::Minimal).unwrap(), "\"Minimal\"");
    }
}
