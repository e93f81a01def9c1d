//! HTML rendering for every page of the site.
//!
//! Pages are assembled from small string builders around a shared layout.
//! Anything that did not come from this file goes through [`escape`].

use crate::config::SiteConfig;
use crate::project::Project;

use super::flash::Flash;
use super::forms::{ContactForm, ProjectForm};

/// Entries of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Home page.
    Home,
    /// About page.
    About,
    /// Résumé page.
    Resume,
    /// Project list and add-project form.
    Projects,
    /// Contact form and thank-you page.
    Contact,
    /// Pages outside the navigation (errors).
    None,
}

const NAV_LINKS: &[(Nav, &str, &str)] = &[
    (Nav::Home, "/", "Home"),
    (Nav::About, "/about", "About"),
    (Nav::Resume, "/resume", "Resume"),
    (Nav::Projects, "/projects", "Projects"),
    (Nav::Contact, "/contact", "Contact"),
];

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; background: #fafafa; }
header { background: #1f2937; color: #fff; padding: 1rem 2rem; display: flex; justify-content: space-between; align-items: center; }
header a { color: #d1d5db; text-decoration: none; margin-left: 1rem; }
header a.active { color: #fff; font-weight: 600; border-bottom: 2px solid #60a5fa; }
main { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
footer { text-align: center; color: #6b7280; padding: 2rem 0; font-size: 0.9rem; }
.flash { padding: 0.75rem 1rem; border-radius: 4px; margin-bottom: 0.5rem; }
.flash-success { background: #dcfce7; color: #166534; }
.flash-error { background: #fee2e2; color: #991b1b; }
.projects { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1.5rem; }
.project-card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); overflow: hidden; }
.project-card img { width: 100%; height: 180px; object-fit: cover; }
.project-card .body { padding: 1rem; }
.tag { display: inline-block; background: #e0e7ff; color: #3730a3; border-radius: 999px; padding: 0.1rem 0.6rem; margin: 0.1rem; font-size: 0.8rem; }
form label { display: block; margin-top: 0.75rem; font-weight: 600; }
form input, form textarea { width: 100%; padding: 0.5rem; box-sizing: border-box; }
form button { margin-top: 1rem; padding: 0.6rem 1.2rem; }
";

/// Escape text for safe inclusion in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared layout.
#[must_use]
pub fn layout(site: &SiteConfig, nav: Nav, title: &str, flashes: &[Flash], body: &str) -> String {
    let owner = escape(&site.owner_name);
    let links: String = NAV_LINKS
        .iter()
        .map(|(entry, href, label)| {
            let class = if *entry == nav { r#" class="active""# } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect();
    let flashes: String = flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}" role="alert">{}</div>"#,
                flash.category.as_str(),
                escape(&flash.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {owner}</title>
<style>{STYLE}</style>
</head>
<body>
<header><a href="/"><strong>{owner}</strong></a><nav>{links}</nav></header>
<main>
<div class="flashes">{flashes}</div>
{body}
</main>
<footer>&copy; {owner}</footer>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Home page body.
#[must_use]
pub fn index(site: &SiteConfig) -> String {
    format!(
        r#"<section class="hero">
<h1>Hi, I'm {owner}.</h1>
<p class="tagline">{tagline}</p>
<p>I design and build clean, accessible web experiences. Take a look at my
<a href="/projects">projects</a>, read more <a href="/about">about me</a>, or
<a href="/contact">get in touch</a>.</p>
</section>"#,
        owner = escape(&site.owner_name),
        tagline = escape(&site.tagline),
    )
}

/// About page body.
#[must_use]
pub fn about(site: &SiteConfig) -> String {
    format!(
        r"<h1>About</h1>
<p>{owner} is a {tagline} who enjoys turning ideas into polished products,
from the first wireframe through to the deployed site.</p>
<h2>What I do</h2>
<ul>
<li>User research, wireframing and prototyping</li>
<li>Visual and interaction design</li>
<li>Responsive front-end development</li>
<li>Small data-backed web applications</li>
</ul>",
        owner = escape(&site.owner_name),
        tagline = escape(&site.tagline.to_lowercase()),
    )
}

/// Résumé page body.
#[must_use]
pub fn resume(site: &SiteConfig) -> String {
    format!(
        r"<h1>Resume</h1>
<h2>{owner}</h2>
<p>{tagline}</p>
<h3>Education</h3>
<p>B.S. in Informatics, concentration in Human-Computer Interaction.</p>
<h3>Experience</h3>
<ul>
<li><strong>Lead Designer &amp; Front-End Developer</strong>, Lovi.AI (2023)</li>
<li><strong>Capstone Team Member</strong>, Mingle Beyond (2024&ndash;2025)</li>
</ul>
<h3>Skills</h3>
<p>Figma, UI/UX Design, HTML5, CSS3, JavaScript, PHP, MySQL, Python, SQLite</p>",
        owner = escape(&site.owner_name),
        tagline = escape(&site.tagline),
    )
}

/// Project list body.
#[must_use]
pub fn projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return r#"<h1>Projects</h1>
<p class="empty">No projects yet. <a href="/add-project">Add the first one</a>.</p>"#
            .to_string();
    }

    let cards: String = projects.iter().map(project_card).collect();
    format!(
        r#"<h1>Projects</h1>
<p><a href="/add-project">Add a project</a></p>
<div class="projects">{cards}</div>"#
    )
}

fn project_card(project: &Project) -> String {
    let optional_line = |label: &str, value: Option<&String>| {
        value
            .map(|v| format!("<p><strong>{label}:</strong> {}</p>", escape(v)))
            .unwrap_or_default()
    };
    let category = project
        .category
        .as_ref()
        .map(|c| format!(r#"<p class="category">{}</p>"#, escape(c)))
        .unwrap_or_default();
    let tags: String = project
        .technology_list()
        .into_iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
        .collect();
    let link = project
        .link_url()
        .map(|url| {
            format!(
                r#"<p><a href="{}" target="_blank" rel="noopener">View project</a></p>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="project-card" id="project-{id}">
<img src="{image}" alt="{title}">
<div class="body">
<h2>{title}</h2>
{category}
<p>{description}</p>
<div class="tags">{tags}</div>
{duration}{role}{link}
</div>
</article>"#,
        id = project.id,
        image = escape(&project.image_path()),
        title = escape(&project.title),
        description = escape(&project.description),
        duration = optional_line("Duration", project.duration.as_ref()),
        role = optional_line("Role", project.role.as_ref()),
    )
}

fn text_input(label: &str, name: &str, kind: &str, value: &str, required: bool) -> String {
    let required = if required { " required" } else { "" };
    format!(
        r#"<label for="{name}">{label}</label>
<input type="{kind}" id="{name}" name="{name}" value="{value}"{required}>
"#,
        value = escape(value),
    )
}

/// Contact form body, pre-filled with the non-secret fields of `values`.
#[must_use]
pub fn contact(values: &ContactForm) -> String {
    let newsletter = if values.wants_newsletter() { " checked" } else { "" };
    format!(
        r#"<h1>Contact</h1>
<p>Have a question or want to work together? Send me a message.</p>
<form method="post" action="/contact">
{first}{last}{email}{password}{confirm}<label><input type="checkbox" name="newsletter"{newsletter}> Subscribe to the newsletter</label>
<button type="submit">Send</button>
</form>"#,
        first = text_input("First name", "firstName", "text", values.first_name(), true),
        last = text_input("Last name", "lastName", "text", values.last_name(), true),
        email = text_input("Email", "email", "email", values.email(), true),
        password = text_input("Password", "password", "password", "", true),
        confirm = text_input("Confirm password", "confirmPassword", "password", "", true),
    )
}

/// Add-project form body, pre-filled from `values`.
#[must_use]
pub fn add_project(values: &ProjectForm) -> String {
    let value = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();
    format!(
        r#"<h1>Add a project</h1>
<form method="post" action="/add-project">
{title}<label for="description">Description</label>
<textarea id="description" name="description" rows="5" required>{description}</textarea>
{image}{category}{technologies}{url}{duration}{role}<button type="submit">Add project</button>
</form>"#,
        title = text_input("Title", "title", "text", &value(&values.title), true),
        description = escape(&value(&values.description)),
        image = text_input(
            "Image filename",
            "image_filename",
            "text",
            &value(&values.image_filename),
            true
        ),
        category = text_input("Category", "category", "text", &value(&values.category), false),
        technologies = text_input(
            "Technologies (comma separated)",
            "technologies",
            "text",
            &value(&values.technologies),
            false
        ),
        url = text_input("Project URL", "project_url", "url", &value(&values.project_url), false),
        duration = text_input("Duration", "duration", "text", &value(&values.duration), false),
        role = text_input("Role", "role", "text", &value(&values.role), false),
    )
}

/// Thank-you page body.
#[must_use]
pub fn thank_you() -> String {
    r#"<h1>Thank you!</h1>
<p>Thanks for reaching out. I'll get back to you as soon as I can.</p>
<p><a href="/">Back to home</a></p>"#
        .to_string()
}

/// 404 page body.
#[must_use]
pub fn not_found() -> String {
    r#"<h1>Page not found</h1>
<p>The page you were looking for doesn't exist. <a href="/">Go home</a>.</p>"#
        .to_string()
}

/// Stand-alone 500 page, rendered without site context.
#[must_use]
pub fn internal_error() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Server error</title></head>
<body>
<h1>Something went wrong</h1>
<p>An unexpected error occurred. Please try again later.</p>
<p><a href="/">Go home</a></p>
</body>
</html>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;

    fn site() -> SiteConfig {
        SiteConfig {
            owner_name: "Ada <Lovelace>".to_string(),
            ..SiteConfig::default()
        }
    }

    fn project() -> Project {
        Project {
            id: 3,
            title: "Test <Project>".to_string(),
            description: "Test Description".to_string(),
            image_filename: "test.jpg".to_string(),
            category: Some("Web".to_string()),
            technologies: Some("Python, Flask".to_string()),
            project_url: Some("http://test.com/?a=1&b=2".to_string()),
            duration: Some("1 month".to_string()),
            role: None,
            created_date: NaiveDateTime::parse_from_str("2025-01-01 00:00:00", TIMESTAMP_FORMAT)
                .unwrap(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_layout_marks_active_nav_and_escapes_owner() {
        let html = layout(&site(), Nav::About, "About", &[], "<p>body</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<a href="/about" class="active">About</a>"#));
        assert!(html.contains(r#"<a href="/resume">Resume</a>"#));
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(!html.contains("Ada <Lovelace>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_layout_renders_flashes() {
        let flashes = vec![
            Flash::error("Passwords do not match"),
            Flash::success("Thank you, <b>Bob</b>!"),
        ];
        let html = layout(&site(), Nav::Contact, "Contact", &flashes, "");
        assert!(html.contains(r#"class="flash flash-error""#));
        assert!(html.contains("Passwords do not match"));
        assert!(html.contains("Thank you, &lt;b&gt;Bob&lt;/b&gt;!"));
    }

    #[test]
    fn test_projects_empty_state() {
        let html = projects(&[]);
        assert!(html.contains("No projects yet"));
    }

    #[test]
    fn test_project_card_fields() {
        let html = projects(&[project()]);
        assert!(html.contains(r#"id="project-3""#));
        assert!(html.contains("Test &lt;Project&gt;"));
        assert!(html.contains(r#"src="/static/images/test.jpg""#));
        assert!(html.contains(r#"<span class="tag">Python</span>"#));
        assert!(html.contains(r#"<span class="tag">Flask</span>"#));
        assert!(html.contains("http://test.com/?a=1&amp;b=2"));
        assert!(html.contains("<strong>Duration:</strong> 1 month"));
        assert!(!html.contains("<strong>Role:</strong>"));
    }

    #[test]
    fn test_project_card_omits_script_link() {
        let mut stored = project();
        stored.project_url = Some("javascript:alert(document.cookie)".to_string());
        let html = projects(&[stored]);
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("View project"));
    }

    #[test]
    fn test_contact_prefills_but_never_echoes_password() {
        let values = ContactForm {
            first_name: Some("John".to_string()),
            email: Some("john@example.com".to_string()),
            password: Some("hunter2".to_string()),
            confirm_password: Some("hunter2".to_string()),
            newsletter: Some("on".to_string()),
            ..ContactForm::default()
        };
        let html = contact(&values);
        assert!(html.contains(r#"value="John""#));
        assert!(html.contains(r#"value="john@example.com""#));
        assert!(!html.contains("hunter2"));
        assert!(html.contains(r#"name="newsletter" checked"#));
    }

    #[test]
    fn test_add_project_prefills() {
        let values = ProjectForm {
            title: Some("My \"App\"".to_string()),
            description: Some("<script>".to_string()),
            ..ProjectForm::default()
        };
        let html = add_project(&values);
        assert!(html.contains(r#"value="My &quot;App&quot;""#));
        assert!(html.contains("&lt;script&gt;</textarea>"));
    }

    #[test]
    fn test_static_pages_mention_owner() {
        let site = site();
        assert!(index(&site).contains("Ada &lt;Lovelace&gt;"));
        assert!(about(&site).contains("Ada &lt;Lovelace&gt;"));
        assert!(resume(&site).contains("Ada &lt;Lovelace&gt;"));
    }

    #[test]
    fn test_error_pages() {
        assert!(thank_you().to_lowercase().contains("thank"));
        assert!(not_found().contains("not found"));
        assert!(internal_error().contains("<html"));
    }
}
