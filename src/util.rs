//! # Misc utilities
//!
//! Slug helpers shared by the blog store and the site pages.

/// Turn a title into a URL slug
pub fn slugify<S: AsRef<str>>(text: S) -> String {
    slug::slugify(text)
}

/// Append `-2`, `-3`, ... to `base` until `taken` no longer claims it
pub fn make_unique_slug<F>(base: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(base) {
        return base.to_owned();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
