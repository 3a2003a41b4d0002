//! Reference documents.

/// Satisfies every standard-profile markup rule
pub const GOOD_PAGE: &str = r#"<!DOCTYPE html><html lang="en"><head><link href="style.css" rel="stylesheet"><title>My Site Title</title></head><body></body></html>"#;

/// `GOOD_PAGE` without the `lang` attribute
pub const NO_LANG_PAGE: &str = r#"<!DOCTYPE html><html><head><link href="style.css" rel="stylesheet"><title>My Site Title</title></head><body></body></html>"#;

/// Satisfies every strict-profile markup rule
pub const STRICT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="description" content="A small static site">
  <meta name="keywords" content="html, css">
  <meta name="author" content="Site Author">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link href="style.css" rel="stylesheet">
  <title>My Site Title</title>
</head>
<body>
  <h1>Hello</h1>
</body>
</html>
"#;

/// No `<head>` written at all
pub const HEADLESS_PAGE: &str = r#"<!DOCTYPE html><html lang="en"><body><p>Just a body</p></body></html>"#;
