//! Demo rows used to populate an empty portfolio.

use crate::project::NewProject;

/// The sample projects inserted by [`super::ProjectStore::seed_sample_data`].
#[must_use]
pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject::new(
            "Lovi.AI - AI Startup Website Design & Development",
            "Designed and helped develop the complete front-end for Lovi.AI, an innovative \
             artificial intelligence startup based in Madrid, Spain. Led the UI/UX design process \
             from concept to implementation using Figma, creating a modern, user-friendly \
             interface that effectively communicates the company's AI solutions while enhancing \
             user engagement and conversion rates.",
            "LoviSC.png",
        )
        .with_category("Web Design & Development")
        .with_technologies("Figma, UI/UX Design, HTML5, CSS3, Responsive Design")
        .with_project_url("https://lovi.ai/")
        .with_duration("June 2023")
        .with_role("Lead Designer & Front-End Developer"),
        NewProject::new(
            "Mingle Beyond - Social Platform for Recent Graduates",
            "Mingle Beyond is a comprehensive web platform designed to help recent college \
             graduates stay connected and supported during the major transition from college to \
             professional life. The platform addresses feelings of isolation and uncertainty by \
             providing a space where users can meet new people, explore shared interests, and \
             build genuine connections within a supportive community.",
            "mingleSC.png",
        )
        .with_category("Senior Capstone")
        .with_technologies("PHP, MySQL, Google Maps API, Google Login, HTML5, CSS3, JavaScript")
        .with_project_url("https://zion-zion.webapps.iu.edu/info-capstone-2025/mingle-beyond#project")
        .with_duration("Fall 2024 - Spring 2025")
        .with_role("Team Member (Team 27)"),
    ]
}
