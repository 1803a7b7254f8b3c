//! Built-in storybook templates. Complete HTML documents with inline
//! styling; no external asset references.

pub const CLASSIC: &str = r#"<html><head><meta charset="utf-8"/><style>body{font-family: Georgia, serif;padding:24px;} h1{color:#333;} .content{margin-bottom:18px;}</style></head><body><h1>{{ child_name }}'s {{ interval }} Story</h1><div class="content">{{ content | nl2br }}</div></body></html>"#;

pub const FAIRY: &str = r#"<html><head><meta charset="utf-8"/><style>body{font-family: "Comic Sans MS", cursive, sans-serif;background:linear-gradient(#fffaf0,#f0f8ff);padding:24px;} h1{color:#b13f9b;} .content{font-size:18px;color:#333}</style></head><body><h1>✨ The Adventures of {{ child_name }} ✨</h1><div class="content">{{ content | nl2br }}</div></body></html>"#;

pub const ADVENTURE: &str = r#"<html><head><meta charset="utf-8"/><style>body{font-family: "Trebuchet MS", sans-serif;padding:24px;background:#fff;} h1{color:#2b6cb0} .content{line-height:1.6}</style></head><body><h1>{{ child_name }}'s Great Adventures</h1><div class="content">{{ content | nl2br }}</div></body></html>"#;
