// src/types/mod.rs
pub mod response;
pub mod resume_data;

pub use resume_data::{
    new_entry_id, Achievement, Education, Entry, Experience, PersonalDetails, ResumeData,
    Section, Skill,
};
