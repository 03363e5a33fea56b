//! Builds a complete site from a temporary directory

use std::fs;
use std::path::Path;

use insights::Site;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scaffold(root: &Path, posts: usize) {
    write(
        root,
        "_config.yml",
        r#"title: Infinite Insights
description: Talks and demos from the team
url: https://insights.example
timezone: Europe/Berlin
videos:
  source: file
jobs:
  source: file
"#,
    );
    write(
        root,
        "data/authors/ada.md",
        "---\nname: Ada Lovelace\navatar: /static/ada.png\ntwitter: https://twitter.com/ada\n---\nWrites things.",
    );
    write(root, "data/authors/default.md", "---\nname: The Team\n---\n");
    for i in 1..=posts {
        write(
            root,
            &format!("data/blog/post-{}.md", i),
            &format!(
                "---\ntitle: Post {i}\ndate: 2023-05-{i:02}\ntags: [rust, release]\nauthors: [ada]\n---\nParagraph {i}.\n"
            ),
        );
    }
    write(
        root,
        "data/blog/wip.md",
        "---\ntitle: Work in progress\ndate: 2023-06-01\ndraft: true\n---\nSoon.",
    );
    write(
        root,
        "data/videos.json",
        r#"{"videos": [{"id": "abc", "title": "Launch talk"}, {"id": "def", "title": "Q&A"}]}"#,
    );
    write(root, "data/jobs.json", r#"[{"title": "Developer Advocate", "location": "Remote"}]"#);
    write(root, "static/ada.png", "png");
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join("public").join(rel)).unwrap()
}

#[tokio::test]
async fn builds_home_posts_and_listings() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path(), 5);

    let site = Site::new(dir.path()).unwrap();
    site.generate().await.unwrap();

    let home = read(dir.path(), "index.html");
    assert_eq!(home.matches(r#"<article class="post-card">"#).count(), 3);
    assert!(home.contains(r#"href="/blog/post-5""#));
    assert!(!home.contains(r#"href="/blog/post-1""#));
    assert!(home.contains("All Posts →"));
    assert!(home.contains("Launch talk"));
    assert!(home.contains("Q&amp;A"));
    assert!(home.contains("Developer Advocate"));
    assert!(home.contains("Talks and demos from the team"));
    assert!(!home.contains("Work in progress"));

    let post = read(dir.path(), "blog/post-3/index.html");
    assert!(post.contains("<p>Paragraph 3.</p>"));
    assert!(post.contains("@ada"));
    assert!(post.contains("Previous Article"));
    assert!(post.contains("Next Article"));
    assert!(post.contains("May 3, 2023"));
    assert!(post.contains("2023-05-03T00:00:00+02:00"));

    let blog = read(dir.path(), "blog/index.html");
    assert_eq!(blog.matches(r#"<article class="post-item">"#).count(), 5);

    let tag = read(dir.path(), "tags/release/index.html");
    assert_eq!(tag.matches(r#"<article class="post-item">"#).count(), 5);

    assert!(dir.path().join("public/static/ada.png").is_file());
    assert!(dir.path().join("public/css/style.css").is_file());

    site.clean().unwrap();
    assert!(!dir.path().join("public").exists());
}

#[tokio::test]
async fn empty_blog_still_builds() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path(), 0);

    let site = Site::new(dir.path()).unwrap();
    site.generate().await.unwrap();

    let home = read(dir.path(), "index.html");
    assert!(home.contains("No posts found."));
    assert!(!home.contains("All Posts"));
}
