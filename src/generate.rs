//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static HTML pages.
//!
//! ## Generated Pages
//!
//! - **Post pages** (`/{slug}.html`): title, date, byline, tags, content
//! - **Listing page** (`/index.html` by default): every post, newest first,
//!   with its excerpt
//!
//! ## Output Structure
//!
//! ```text
//! blog/
//! ├── index.html                 # Listing page
//! ├── hello-world.html           # Post pages
//! └── notes-on-parsing.html
//! ```
//!
//! By default pages are written next to their sources; `--output` moves them.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Record fields are escaped by maud; the rendered post body is already
//! escaped by the markup renderer and is inserted as-is.

use crate::collection::Collection;
use crate::config::BlogConfig;
use crate::document::DocumentRecord;
use crate::scan::Manifest;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// Pages written by one generate run.
#[derive(Debug, Default, PartialEq)]
pub struct GenerateReport {
    pub index: PathBuf,
    pub pages: Vec<PathBuf>,
}

/// Read a `manifest.json` written by the scan stage.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&manifest_content)?)
}

/// Generate the site from a `manifest.json` written by the scan stage.
///
/// Returns the manifest alongside the report so callers can describe what
/// was written without reading it again.
pub fn generate(
    manifest_path: &Path,
    output_dir: &Path,
) -> Result<(Manifest, GenerateReport), GenerateError> {
    let manifest = load_manifest(manifest_path)?;
    let report = write_site(&manifest, output_dir)?;
    Ok((manifest, report))
}

/// Write every post page and the listing page into `output_dir`.
pub fn write_site(manifest: &Manifest, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut report = GenerateReport::default();
    for post in &manifest.collection.posts {
        let page = render_post_page(post, &manifest.config);
        let path = output_dir.join(&post.href);
        fs::write(&path, page.into_string())?;
        log::debug!("wrote {}", path.display());
        report.pages.push(path);
    }

    let index = render_index(&manifest.collection, &manifest.config);
    report.index = output_dir.join(&manifest.config.index_file);
    fs::write(&report.index, index.into_string())?;

    log::info!(
        "generated {} post pages and {}",
        report.pages.len(),
        manifest.config.index_file
    );
    Ok(report)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Renders the site header linking back to the listing page
fn site_header(config: &BlogConfig) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                a href=(config.index_file) { (config.site_title) }
            }
        }
    }
}

/// Renders the date and byline line shared by post and listing pages
fn post_meta(post: &DocumentRecord) -> Markup {
    html! {
        p.post-meta {
            time datetime=(post.date_iso) { (post.date_human) }
            @if !post.author_line.is_empty() {
                " \u{b7} "
                span.byline { (post.author_line) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a single post page
fn render_post_page(post: &DocumentRecord, config: &BlogConfig) -> Markup {
    let content = html! {
        (site_header(config))
        main {
            article.post {
                h1 { (post.title) }
                (post_meta(post))
                @if !post.tags.is_empty() {
                    ul.tags {
                        @for tag in &post.tags {
                            li { (tag) }
                        }
                    }
                }
                div.post-content {
                    "\n"
                    (PreEscaped(&post.content))
                }
            }
        }
    };

    let title = format!("{} \u{2014} {}", post.title, config.site_title);
    base_document(&title, "post-page", content)
}

/// Renders the listing page with every post in collection order
fn render_index(collection: &Collection, config: &BlogConfig) -> Markup {
    let content = html! {
        main {
            h1 { (config.site_title) }
            ul.post-list {
                @for post in &collection.posts {
                    li.post-summary {
                        h2 {
                            a href=(post.href) { (post.title) }
                        }
                        (post_meta(post))
                        @if !post.excerpt.is_empty() {
                            p.excerpt { (post.excerpt) }
                        }
                    }
                }
            }
        }
    };

    base_document(&config.site_title, "index-page", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{record, setup_blog};

    fn sample_post() -> DocumentRecord {
        let mut post = record("hello-world", "2025-01-14");
        post.title = "Hello <World>".to_string();
        post.authors = vec!["Ada".to_string(), "Grace".to_string()];
        post.author_line = "Ada & Grace".to_string();
        post.tags = vec!["rust".to_string(), "web".to_string()];
        post.content = "      <p>Hi <strong>there</strong></p>\n".to_string();
        post
    }

    fn sample_manifest() -> Manifest {
        Manifest {
            collection: Collection::new(vec![
                sample_post(),
                record("older", "2024-02-01"),
            ]),
            config: BlogConfig::default(),
        }
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn base_document_includes_doctype() {
        let html = base_document("T", "x", html! {}).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains("class=\"x\""));
    }

    #[test]
    fn site_header_links_to_index() {
        let html = site_header(&BlogConfig::default()).into_string();
        assert!(html.contains("href=\"index.html\""));
        assert!(html.contains(">Blog</a>"));
    }

    #[test]
    fn post_meta_omits_empty_byline() {
        let html = post_meta(&record("a", "2025-01-01")).into_string();
        assert!(html.contains("<time datetime=\"2025-01-01\">January 1, 2025</time>"));
        assert!(!html.contains("byline"));
    }

    // =========================================================================
    // Post pages
    // =========================================================================

    #[test]
    fn post_page_escapes_fields_but_not_content() {
        let html = render_post_page(&sample_post(), &BlogConfig::default()).into_string();
        assert!(html.contains("<h1>Hello &lt;World&gt;</h1>"));
        assert!(html.contains("<p>Hi <strong>there</strong></p>"));
        assert!(html.contains("Ada &amp; Grace"));
    }

    #[test]
    fn post_page_lists_tags() {
        let html = render_post_page(&sample_post(), &BlogConfig::default()).into_string();
        assert!(html.contains("<li>rust</li>"));
        assert!(html.contains("<li>web</li>"));
    }

    #[test]
    fn post_page_without_tags_has_no_tag_list() {
        let html = render_post_page(&record("a", "2025-01-01"), &BlogConfig::default())
            .into_string();
        assert!(!html.contains("class=\"tags\""));
    }

    // =========================================================================
    // Listing page
    // =========================================================================

    #[test]
    fn index_lists_posts_in_order() {
        let manifest = sample_manifest();
        let html = render_index(&manifest.collection, &manifest.config).into_string();
        let first = html.find("href=\"hello-world.html\"").unwrap();
        let second = html.find("href=\"older.html\"").unwrap();
        assert!(first < second);
        assert!(html.contains("Body of older."));
    }

    #[test]
    fn index_uses_site_title() {
        let config = BlogConfig {
            site_title: "Field Notes".to_string(),
            ..BlogConfig::default()
        };
        let html = render_index(&Collection::default(), &config).into_string();
        assert!(html.contains("<title>Field Notes</title>"));
        assert!(html.contains("<h1>Field Notes</h1>"));
    }

    // =========================================================================
    // Writing
    // =========================================================================

    #[test]
    fn write_site_writes_pages_and_index() {
        let tmp = setup_blog(&[]);
        let out = tmp.path().join("public");
        let report = write_site(&sample_manifest(), &out).unwrap();

        assert_eq!(report.index, out.join("index.html"));
        assert_eq!(
            report.pages,
            [out.join("hello-world.html"), out.join("older.html")]
        );
        for path in report.pages.iter().chain([&report.index]) {
            assert!(path.exists(), "{} missing", path.display());
        }
    }

    #[test]
    fn generate_reads_manifest_json() {
        let tmp = setup_blog(&[]);
        let manifest_path = tmp.path().join("manifest.json");
        fs::write(
            &manifest_path,
            serde_json::to_string_pretty(&sample_manifest()).unwrap(),
        )
        .unwrap();

        let (manifest, report) = generate(&manifest_path, tmp.path()).unwrap();
        assert_eq!(manifest.collection.len(), 2);
        assert_eq!(manifest.config, BlogConfig::default());
        assert_eq!(report.pages.len(), 2);
        let page = fs::read_to_string(tmp.path().join("older.html")).unwrap();
        assert!(page.contains("Body of older."));
    }

    #[test]
    fn load_manifest_matches_written_manifest() {
        let tmp = setup_blog(&[]);
        let manifest_path = tmp.path().join("manifest.json");
        let written = sample_manifest();
        fs::write(&manifest_path, serde_json::to_string(&written).unwrap()).unwrap();

        let loaded = load_manifest(&manifest_path).unwrap();
        assert_eq!(loaded.collection.posts, written.collection.posts);
    }

    #[test]
    fn generate_missing_manifest_is_io_error() {
        let tmp = setup_blog(&[]);
        let result = generate(&tmp.path().join("manifest.json"), tmp.path());
        assert!(matches!(result, Err(GenerateError::Io(_))));
    }

    #[test]
    fn generate_rejects_invalid_manifest() {
        let tmp = setup_blog(&[("manifest.json", "{ not json")]);
        let result = generate(&tmp.path().join("manifest.json"), tmp.path());
        assert!(matches!(result, Err(GenerateError::Json(_))));
    }
}
