//! Marketing pages with fixed copy
use super::{blog, layout, Meta, SiteConfig};
use crate::render::escape_html;
use crate::store::BlogRecord;
use serde_json::json;

/// A production shown in the portfolio
#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub tagline: &'static str,
    pub summary: &'static str,
    pub cover: &'static str,
    pub year: &'static str,
}

pub static PROJECTS: [Project; 6] = [
    Project {
        slug: "taraharu",
        title: "Taraharu",
        category: "Feature Film",
        tagline: "A Journey Through Stars and Emotions",
        summary: "A cinematic journey showcasing emotion and storytelling",
        cover: "/Taraharu.jpeg",
        year: "2023",
    },
    Project {
        slug: "kaancho-dhaago",
        title: "Kaancho Dhaago",
        category: "Theatre",
        tagline: "Threads of the Heart",
        summary: "Theatrical masterpiece exploring inner emotions",
        cover: "/KaanchoDhaago.jpeg",
        year: "2022",
    },
    Project {
        slug: "sath-sathi-aaideuna",
        title: "Sathi Sathi Aaideuna",
        category: "Theatre",
        tagline: "Friendship on Stage",
        summary: "Life lessons through powerful performances",
        cover: "/SathiSathiAaideuna.jpeg",
        year: "2021",
    },
    Project {
        slug: "dhalkeko-saalaijo",
        title: "Dhalkeko Saalaijo",
        category: "Theatre",
        tagline: "Songs of the Hills",
        summary: "Universal storytelling for all audiences",
        cover: "/DhalkekoSaalaijo.jpeg",
        year: "2020",
    },
    Project {
        slug: "bullet-and-the-buddha",
        title: "Bullet and the Buddha",
        category: "Theatre",
        tagline: "Conflict and Calm",
        summary: "Contrasting philosophies in dramatic form",
        cover: "/BulletAndTheBuddha.jpeg",
        year: "2019",
    },
    Project {
        slug: "katha-express",
        title: "Katha Express",
        category: "Theatre",
        tagline: "All Aboard for Stories",
        summary: "Stories that move and inspire",
        cover: "/KathaExpress.jpeg",
        year: "2021",
    },
];

pub fn project(slug: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.slug == slug)
}

const SERVICES: [(&str, &str); 6] = [
    (
        "Feature Films",
        "Full-scale movie production from script to screen with cinematic excellence",
    ),
    (
        "Music Videos",
        "Creative music video production that captures the soul of your sound",
    ),
    (
        "Brand Content & Commercials",
        "Compelling brand videos and commercials that tell your story",
    ),
    (
        "Theatre Productions",
        "Theatrical masterpieces from concept to stage performance",
    ),
    (
        "Documentaries",
        "Authentic storytelling capturing real-life narratives with impact",
    ),
    (
        "Post Production",
        "Expert editing, VFX, sound design, and color grading services",
    ),
];

const TESTIMONIALS: [(&str, &str, &str); 6] = [
    ("John Carter", "Film Director", "Ways Private Limited transformed my script into a cinematic masterpiece. Their team truly understands storytelling."),
    ("Aisha Khan", "Music Artist", "They turned my vision into a music video that exceeded expectations. Professional, creative, and passionate!"),
    ("Rajiv Sharma", "Brand Manager", "Our brand film not only boosted awareness but gave us a cinematic identity. Truly world-class execution."),
    ("Emily Brown", "Producer", "From concept to final edit, the dedication and artistry blew us away. They are our go-to creative team now."),
    ("Sanjay Mehta", "Entrepreneur", "Our corporate documentary was shot and edited with cinematic brilliance. Exceeded expectations on all fronts."),
    ("Laura Smith", "Creative Director", "They know how to bring emotion into visuals. Every frame felt purposeful and powerful."),
];

const PROCESS: [(&str, &str); 4] = [
    ("Discovery", "Understanding your vision, goals, and audience"),
    (
        "Creative Development",
        "Crafting scripts, storyboards, and production plans",
    ),
    ("Production", "Professional filming with state-of-the-art equipment"),
    (
        "Post-Production",
        "Editing, VFX, sound design, and final delivery",
    ),
];

pub const CONTACT_PHONE: &str = "+977 9803008298";
pub const CONTACT_EMAIL: &str = "waysprivateltd@gmail.com";

fn hero(title: &str, subtitle: &str) -> String {
    format!(
        concat!(
            r#"<section class="pt-32 pb-16 px-4 text-center bg-gradient-to-b from-black to-slate-900">"#,
            r#"<h1 class="text-5xl md:text-7xl font-extrabold text-white mb-6 leading-tight">{}</h1>"#,
            r#"<p class="text-xl md:text-2xl text-slate-300 max-w-3xl mx-auto leading-relaxed">{}</p>"#,
            "</section>"
        ),
        escape_html(title),
        escape_html(subtitle)
    )
}

fn card(title: &str, text: &str) -> String {
    format!(
        concat!(
            r#"<div class="p-8 rounded-2xl bg-slate-800/50">"#,
            r#"<h3 class="text-2xl font-bold text-white mb-4">{}</h3>"#,
            r#"<p class="text-slate-300 leading-relaxed">{}</p></div>"#
        ),
        escape_html(title),
        escape_html(text)
    )
}

fn grid(cards: String) -> String {
    format!(
        r#"<section class="max-w-6xl mx-auto px-4 py-16 grid md:grid-cols-3 gap-8">{}</section>"#,
        cards
    )
}

fn project_card(project: &Project) -> String {
    format!(
        concat!(
            r#"<a href="/portfolio/{slug}" class="block rounded-2xl overflow-hidden bg-slate-800/50">"#,
            r#"<img src="{cover}" alt="{title}" class="w-full h-64 object-cover" loading="lazy">"#,
            r#"<div class="p-6"><span class="text-sm text-blue-400">{category} &middot; {year}</span>"#,
            r#"<h3 class="text-2xl font-bold text-white">{title}</h3>"#,
            r#"<p class="text-slate-300">{summary}</p></div></a>"#
        ),
        slug = project.slug,
        cover = project.cover,
        title = escape_html(project.title),
        category = project.category,
        year = project.year,
        summary = escape_html(project.summary),
    )
}

fn page_meta(site: &SiteConfig, title: &str, description: &str, path: &str) -> Meta {
    Meta {
        title: format!("{} | {}", title, site.name),
        description: description.to_owned(),
        path: path.to_owned(),
        ..Meta::default()
    }
}

/// The landing page; `latest` are the newest published posts
pub fn home(site: &SiteConfig, latest: &[BlogRecord]) -> String {
    let mut meta = page_meta(site, "Nepali Movie Production", &site.description, "/");
    meta.json_ld = Some(json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.name,
        "url": site.base_url,
        "description": site.description,
        "email": CONTACT_EMAIL,
        "telephone": CONTACT_PHONE,
    }));

    let mut body = hero(
        "Stories Crafted for the Screen",
        "Films, theatre, music videos and brand content from Kathmandu to the world.",
    );
    body.push_str(&grid(
        PROJECTS.iter().take(3).map(project_card).collect(),
    ));
    if !latest.is_empty() {
        body.push_str(r#"<h2 class="text-4xl font-bold text-center text-white">Latest from the Blog</h2>"#);
        body.push_str(&grid(latest.iter().map(blog::card).collect()));
    }
    layout(site, &meta, &format!("<main>{}</main>", body))
}

pub fn about(site: &SiteConfig) -> String {
    let meta = page_meta(
        site,
        "About Us",
        "Nepal's premier production company with roots in theatre and a passion for cinematic storytelling.",
        "/about",
    );
    let mut body = hero(
        "About Us",
        "From the stage to the screen, we tell stories that resonate.",
    );
    body.push_str(&grid(
        [
            ("End-to-End Production", "From initial concept to final delivery, we handle every aspect of production with meticulous care and creative excellence."),
            ("Theatre Heritage", "Our roots in theatrical storytelling bring depth, emotion, and powerful narrative techniques to every cinematic project."),
            ("Collaborative Approach", "We work as your creative partner, valuing your vision while bringing our expertise to elevate every aspect of the project."),
        ]
        .iter()
        .map(|(title, text)| card(title, text))
        .collect(),
    ));
    body.push_str(&grid(
        PROCESS
            .iter()
            .enumerate()
            .map(|(i, (title, text))| card(&format!("{:02} {}", i + 1, title), text))
            .collect(),
    ));
    layout(site, &meta, &format!("<main>{}</main>", body))
}

pub fn services(site: &SiteConfig) -> String {
    let meta = page_meta(
        site,
        "Our Services",
        "Film production services in Nepal: feature films, music videos, commercials, theatre, documentaries and post production.",
        "/services",
    );
    let mut body = hero("Our Services", "Everything a production needs, under one roof.");
    body.push_str(&grid(
        SERVICES.iter().map(|(title, text)| card(title, text)).collect(),
    ));
    layout(site, &meta, &format!("<main>{}</main>", body))
}

pub fn portfolio(site: &SiteConfig) -> String {
    let meta = page_meta(
        site,
        "Portfolio",
        "Feature films and theatre productions by Ways Private Limited.",
        "/portfolio",
    );
    let mut body = hero("Our Work", "Productions we are proud of.");
    body.push_str(&grid(PROJECTS.iter().map(project_card).collect()));
    layout(site, &meta, &format!("<main>{}</main>", body))
}

/// A single production, or `None` for an unknown slug
pub fn project_page(site: &SiteConfig, slug: &str) -> Option<String> {
    let project = project(slug)?;
    let path = format!("/portfolio/{}", project.slug);
    let mut meta = page_meta(site, project.title, project.summary, &path);
    meta.og_image = Some(site.url(project.cover));
    meta.json_ld = Some(json!({
        "@context": "https://schema.org",
        "@type": "CreativeWork",
        "name": project.title,
        "genre": project.category,
        "dateCreated": project.year,
        "image": site.url(project.cover),
        "url": site.url(&path),
        "creator": { "@type": "Organization", "name": site.name },
    }));
    let body = format!(
        concat!(
            "<main>{hero}",
            r#"<section class="max-w-4xl mx-auto px-4 py-16">"#,
            r#"<img src="{cover}" alt="{title}" class="w-full rounded-2xl">"#,
            r#"<p class="mt-8 text-slate-300">{category} &middot; {year}</p>"#,
            "</section></main>"
        ),
        hero = hero(project.title, project.tagline),
        cover = project.cover,
        title = escape_html(project.title),
        category = project.category,
        year = project.year,
    );
    Some(layout(site, &meta, &body))
}

pub fn testimonials(site: &SiteConfig) -> String {
    let meta = page_meta(
        site,
        "Testimonials",
        "What directors, artists and brands say about working with us.",
        "/testimonials",
    );
    let mut body = hero("Testimonials", "Words from the people we create with.");
    body.push_str(&grid(
        TESTIMONIALS
            .iter()
            .map(|(name, role, quote)| card(&format!("{}, {}", name, role), quote))
            .collect(),
    ));
    layout(site, &meta, &format!("<main>{}</main>", body))
}

pub fn contact(site: &SiteConfig) -> String {
    let meta = page_meta(
        site,
        "Contact Us",
        "Get in touch to start your next film, music video or brand production.",
        "/contact",
    );
    let body = format!(
        concat!(
            "<main>{hero}",
            r#"<section class="max-w-3xl mx-auto px-4 py-16 text-slate-300">"#,
            r#"<p>Phone: <a href="tel:{tel}">{phone}</a></p>"#,
            r#"<p>Email: <a href="mailto:{email}">{email}</a></p>"#,
            "<p>Kathmandu, Nepal</p>",
            "</section></main>"
        ),
        hero = hero("Contact Us", "Tell us about your project."),
        tel = CONTACT_PHONE.replace(' ', ""),
        phone = CONTACT_PHONE,
        email = CONTACT_EMAIL,
    );
    layout(site, &meta, &body)
}

/// The body shown for unknown paths
pub fn not_found(site: &SiteConfig) -> String {
    let meta = page_meta(site, "Page Not Found", "This page does not exist.", "/404");
    layout(
        site,
        &meta,
        &format!(
            "<main>{}</main>",
            hero("Page Not Found", "The page you are looking for does not exist.")
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_render() {
        let site = SiteConfig::default();
        assert!(home(&site, &[]).contains("Stories Crafted for the Screen"));
        assert!(!home(&site, &[]).contains("Latest from the Blog"));
        assert!(about(&site).contains("<title>About Us | Ways Private Limited</title>"));
        assert!(services(&site).contains("Post Production"));
        assert!(portfolio(&site).contains(r#"href="/portfolio/katha-express""#));
        assert!(testimonials(&site).contains("Laura Smith, Creative Director"));
        assert!(contact(&site).contains(r#"href="tel:+9779803008298""#));
    }

    #[test]
    fn test_project_page() {
        let site = SiteConfig::default();
        let html = project_page(&site, "taraharu").unwrap();
        assert!(html.contains("A Journey Through Stars and Emotions"));
        assert!(html.contains(r#""@type":"CreativeWork""#));
        assert!(project_page(&site, "missing").is_none());
    }
}
