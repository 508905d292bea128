use katha_vault_be::models::comment::sanitize_body;
use katha_vault_be::models::story::slugify;

#[test]
fn test_slugify_basic() {
    assert_eq!(slugify("The Vault of Stars"), "the-vault-of-stars");
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("Chapter 1: Beginnings"), "chapter-1-beginnings");
}

#[test]
fn test_slugify_collapses_separators() {
    assert_eq!(slugify("  spaced   out  "), "spaced-out");
    assert_eq!(slugify("a---b"), "a-b");
    assert_eq!(slugify("__private__"), "private");
}

#[test]
fn test_slugify_never_empty() {
    assert_eq!(slugify(""), "story");
    assert_eq!(slugify("!!!"), "story");
    // Non-ASCII titles fall back too rather than producing an empty slug.
    assert_eq!(slugify("......"), "story");
}

#[test]
fn test_sanitize_escapes_html() {
    assert_eq!(
        sanitize_body("<script>alert('x')</script>"),
        "&lt;script&gt;alert('x')&lt;/script&gt;"
    );
    assert_eq!(sanitize_body("a < b & b > c"), "a &lt; b &amp; b &gt; c");
}

#[test]
fn test_sanitize_trims_whitespace() {
    assert_eq!(sanitize_body("  hello  "), "hello");
    assert_eq!(sanitize_body("   "), "");
}
