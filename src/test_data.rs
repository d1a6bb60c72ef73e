#[cfg(test)]
pub const POST_JSON: &str = r#"{
    "title": "JavaNerd blog",
    "type": "POST",
    "content": "First post of the blog",
    "rubric": "java",
    "createDate": "2016-1-1",
    "link": "/post/2016-1-1/JavaNerd-blog"
}"#;

#[cfg(test)]
pub fn post_json(title: &str, date: &str) -> String {
    format!(
        r#"{{"title": "{}", "type": "POST", "content": "Body of {}", "rubric": "news", "createDate": "{}", "link": "/post/{}/{}"}}"#,
        title, title, date, date, title
    )
}
