//! Catalog seeder for IeNet.
//!
//! Inserts the standard service categories, services, features, portfolio
//! projects and starter content templates.
//!
//! Usage:
//! ```bash
//! # Seed into the database from DB_* / DATABASE_URL
//! cargo run --bin ienet-seed
//!
//! # Clear catalog, projects and templates first
//! cargo run --bin ienet-seed -- --reset
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use ienet_core::core::config::DatabaseConfig;
use ienet_core::core::database;
use ienet_core::features::pages::models::PageContent;
use serde_json::json;
use sqlx::{MySql, Transaction};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ienet-seed",
    about = "IeNet catalog seeder",
    long_about = "Populate service categories, services, features, projects and content templates"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long, env = "SEED_DATABASE_URL")]
    database_url: Option<String>,

    /// Delete catalog, projects and templates before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

struct CategorySeed {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    icon: &'static str,
    color: &'static str,
    meta_title: &'static str,
    meta_description: &'static str,
}

struct ServiceSeed {
    category: &'static str,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    short_description: &'static str,
    icon: &'static str,
    meta_title: &'static str,
}

struct FeatureSeed {
    service: &'static str,
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    technical_details: &'static str,
    benefits: &'static str,
    meta_title: &'static str,
}

struct ProjectSeed {
    title: &'static str,
    slug: &'static str,
    short_description: &'static str,
    description: &'static str,
    image_url: &'static str,
    technologies: &'static [&'static str],
    client_name: &'static str,
    completed: (i32, u32, u32),
    featured: bool,
}

fn categories() -> Vec<CategorySeed> {
    vec![
        CategorySeed {
            name: "Website Development",
            slug: "website-development",
            description: "Custom websites, e-commerce platforms, and web applications built with modern technologies",
            icon: "code",
            color: "primary",
            meta_title: "Website Development Services | Custom Web Solutions",
            meta_description: "Professional website development services including custom websites, e-commerce platforms, and web applications.",
        },
        CategorySeed {
            name: "Web Hosting & Infrastructure",
            slug: "web-hosting",
            description: "Reliable hosting solutions from shared hosting to dedicated servers and cloud infrastructure",
            icon: "server",
            color: "emerald",
            meta_title: "Web Hosting & Infrastructure Services | Reliable Hosting Solutions",
            meta_description: "Web hosting and infrastructure services including shared hosting, VPS, cloud hosting, and dedicated servers.",
        },
        CategorySeed {
            name: "Cybersecurity",
            slug: "cybersecurity",
            description: "Comprehensive security services to protect your digital assets and ensure compliance",
            icon: "shield",
            color: "red",
            meta_title: "Cybersecurity Services | Digital Asset Protection",
            meta_description: "Cybersecurity services including vulnerability assessment, penetration testing, security audits, and managed security.",
        },
        CategorySeed {
            name: "Mobile App Development",
            slug: "mobile-development",
            description: "Native and cross-platform mobile applications for iOS and Android platforms",
            icon: "smartphone",
            color: "purple",
            meta_title: "Mobile App Development | iOS & Android Apps",
            meta_description: "Mobile app development services for iOS and Android using native and cross-platform technologies.",
        },
        CategorySeed {
            name: "Database Management",
            slug: "database-management",
            description: "Database design, optimization, and management services for optimal performance",
            icon: "database",
            color: "amber",
            meta_title: "Database Management Services | Database Design & Optimization",
            meta_description: "Database management services including design, optimization, backup, and performance tuning.",
        },
        CategorySeed {
            name: "DevOps & Automation",
            slug: "devops-automation",
            description: "CI/CD pipelines, infrastructure automation, and deployment optimization",
            icon: "cog",
            color: "indigo",
            meta_title: "DevOps & Automation Services | CI/CD and Infrastructure",
            meta_description: "DevOps and automation services including CI/CD pipelines, infrastructure automation, and deployment optimization.",
        },
    ]
}

fn services() -> Vec<ServiceSeed> {
    vec![
        ServiceSeed {
            category: "website-development",
            name: "UI/UX Design",
            slug: "ui-ux-design",
            description: "User interface and user experience design focused on intuitive, engaging digital experiences",
            short_description: "Professional UI/UX design for optimal user experiences",
            icon: "paintbrush",
            meta_title: "UI/UX Design Services | User Experience Design",
        },
        ServiceSeed {
            category: "website-development",
            name: "E-commerce Development",
            slug: "ecommerce-development",
            description: "Complete e-commerce solutions with shopping carts, payment gateways, and inventory management",
            short_description: "Full-featured e-commerce platforms for online businesses",
            icon: "shopping-cart",
            meta_title: "E-commerce Development Services | Online Store Solutions",
        },
        ServiceSeed {
            category: "website-development",
            name: "CMS Development",
            slug: "cms-development",
            description: "Content management systems that make it easy to update and maintain your website",
            short_description: "Custom content management systems for easy website maintenance",
            icon: "edit",
            meta_title: "CMS Development Services | Content Management Systems",
        },
        ServiceSeed {
            category: "website-development",
            name: "Progressive Web Apps",
            slug: "progressive-web-apps",
            description: "Modern web applications that work like native mobile apps with offline capabilities",
            short_description: "Web apps with native mobile app features and offline support",
            icon: "smartphone",
            meta_title: "Progressive Web App Development | PWA Services",
        },
        ServiceSeed {
            category: "web-hosting",
            name: "Shared Hosting",
            slug: "shared-hosting",
            description: "Cost-effective hosting solution perfect for small to medium websites",
            short_description: "Affordable shared hosting for small to medium websites",
            icon: "server",
            meta_title: "Shared Web Hosting Services | Affordable Website Hosting",
        },
        ServiceSeed {
            category: "web-hosting",
            name: "VPS Hosting",
            slug: "vps-hosting",
            description: "Virtual private servers with dedicated resources and full root access",
            short_description: "Dedicated virtual servers with full control and guaranteed resources",
            icon: "hard-drive",
            meta_title: "VPS Hosting Services | Virtual Private Servers",
        },
        ServiceSeed {
            category: "web-hosting",
            name: "Cloud Hosting",
            slug: "cloud-hosting",
            description: "Scalable cloud infrastructure with high availability and automatic scaling",
            short_description: "Scalable cloud hosting with high availability and auto-scaling",
            icon: "cloud",
            meta_title: "Cloud Hosting Services | Scalable Cloud Infrastructure",
        },
        ServiceSeed {
            category: "web-hosting",
            name: "Domain Registration",
            slug: "domain-registration",
            description: "Domain name registration and management services with DNS control",
            short_description: "Domain registration and DNS management services",
            icon: "globe",
            meta_title: "Domain Registration Services | Domain Names & DNS",
        },
        ServiceSeed {
            category: "cybersecurity",
            name: "Vulnerability Assessment",
            slug: "vulnerability-assessment",
            description: "Comprehensive security assessments to identify potential vulnerabilities in your systems",
            short_description: "Thorough security assessments to identify system vulnerabilities",
            icon: "search",
            meta_title: "Vulnerability Assessment Services | Security Evaluations",
        },
        ServiceSeed {
            category: "cybersecurity",
            name: "Penetration Testing",
            slug: "penetration-testing",
            description: "Ethical hacking services to test your security defenses and identify weaknesses",
            short_description: "Ethical hacking to test and strengthen security defenses",
            icon: "shield-alert",
            meta_title: "Penetration Testing Services | Ethical Hacking",
        },
        ServiceSeed {
            category: "cybersecurity",
            name: "Security Audits",
            slug: "security-audits",
            description: "Comprehensive security reviews of policies, procedures, and technical controls",
            short_description: "Complete security reviews of policies and technical controls",
            icon: "clipboard-check",
            meta_title: "Security Audit Services | Comprehensive Security Reviews",
        },
        ServiceSeed {
            category: "cybersecurity",
            name: "Managed Security",
            slug: "managed-security",
            description: "24/7 security monitoring and incident response services",
            short_description: "Round-the-clock security monitoring and incident response",
            icon: "shield-check",
            meta_title: "Managed Security Services | 24/7 Security Monitoring",
        },
    ]
}

fn features() -> Vec<FeatureSeed> {
    vec![
        FeatureSeed {
            service: "ui-ux-design",
            name: "Wireframing & Prototyping",
            slug: "wireframing-prototyping",
            description: "Detailed wireframes and interactive prototypes to visualize the user experience before development",
            technical_details: "Figma, Sketch, Adobe XD and InVision for wireframes and prototypes, with journey mapping, information architecture and prototype testing.",
            benefits: "Finds issues early, aligns stakeholders on a visual reference and gives developers clear specifications.",
            meta_title: "Wireframing & Prototyping Services | UI/UX Design",
        },
        FeatureSeed {
            service: "ui-ux-design",
            name: "User Journey Mapping",
            slug: "user-journey-mapping",
            description: "Analyze and optimize the complete user experience across all touchpoints",
            technical_details: "User research, persona development, touchpoint identification, emotion mapping and opportunity analysis in Miro and Lucidchart.",
            benefits: "Removes pain points, lifts conversion at key touchpoints and improves retention.",
            meta_title: "User Journey Mapping Services | UX Optimization",
        },
        FeatureSeed {
            service: "ui-ux-design",
            name: "Usability Testing",
            slug: "usability-testing",
            description: "Test interfaces with real users to identify usability issues and improvement opportunities",
            technical_details: "Test planning, participant recruitment, moderated sessions and analysis with UserTesting, Hotjar and Maze.",
            benefits: "Objective insight into user behaviour and design decisions validated with real data.",
            meta_title: "Usability Testing Services | User Experience Validation",
        },
    ]
}

fn projects() -> Vec<ProjectSeed> {
    vec![
        ProjectSeed {
            title: "Optical Store Management System",
            slug: "optical-store-management",
            short_description: "Complete inventory, prescription, and customer management system for optical stores",
            description: "Inventory management, prescription tracking, customer records and sales reporting for optical retailers.",
            image_url: "https://images.unsplash.com/photo-1574258495973-f010dfbb5371?auto=format&fit=crop&w=1200&h=600",
            technologies: &["React", "Node.js", "PostgreSQL", "Express", "Redux"],
            client_name: "VisionCare Optics",
            completed: (2023, 8, 15),
            featured: true,
        },
        ProjectSeed {
            title: "Hospital Management System",
            slug: "hospital-management-system",
            short_description: "Integrated patient records, scheduling, billing, and inventory management for hospitals",
            description: "Patient records, appointment scheduling, billing, inventory, staff management and reporting for a multi-specialty hospital.",
            image_url: "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?auto=format&fit=crop&w=1200&h=600",
            technologies: &["Angular", "Java Spring Boot", "PostgreSQL", "Redis", "Docker"],
            client_name: "City General Hospital",
            completed: (2023, 11, 30),
            featured: true,
        },
        ProjectSeed {
            title: "School Management System",
            slug: "school-management-system",
            short_description: "Student information, attendance, grading, and parent communication in one platform",
            description: "Admissions, attendance, grading, timetables and parent communication for a K-12 school.",
            image_url: "https://images.unsplash.com/photo-1580582932707-520aed937b7b?auto=format&fit=crop&w=1200&h=600",
            technologies: &["Vue.js", "Laravel", "MySQL", "Redis", "WebSocket"],
            client_name: "Bright Future Academy",
            completed: (2024, 2, 20),
            featured: true,
        },
        ProjectSeed {
            title: "Hotel Management System",
            slug: "hotel-management-system",
            short_description: "Reservations, front desk, housekeeping, and billing for hotels",
            description: "Reservations, check-in, housekeeping, point of sale and channel management for a city hotel.",
            image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=1200&h=600",
            technologies: &["React", "Django", "PostgreSQL", "Celery", "Stripe API"],
            client_name: "Grand Plaza Hotel",
            completed: (2024, 5, 10),
            featured: true,
        },
        ProjectSeed {
            title: "HR & Payroll Management System",
            slug: "hr-payroll-system",
            short_description: "Employee records, leave, attendance, and payroll processing",
            description: "Employee lifecycle, leave and attendance tracking with automated payroll and payslip generation.",
            image_url: "https://images.unsplash.com/photo-1521791136064-7986c2920216?auto=format&fit=crop&w=1200&h=600",
            technologies: &["React", "Node.js", "MongoDB", "Express", "PDF Generation"],
            client_name: "TechCorp Solutions",
            completed: (2024, 7, 1),
            featured: false,
        },
        ProjectSeed {
            title: "Accounting Management System",
            slug: "accounting-management-system",
            short_description: "General ledger, invoicing, and financial reporting for accounting firms",
            description: "Double-entry ledger, client invoicing, tax preparation support and financial statements.",
            image_url: "https://images.unsplash.com/photo-1554224155-6726b3ff858f?auto=format&fit=crop&w=1200&h=600",
            technologies: &["Angular", "Spring Boot", "PostgreSQL", "JasperReports", "REST API"],
            client_name: "Smith & Associates CPA",
            completed: (2024, 9, 15),
            featured: false,
        },
    ]
}

/// Starter templates offered when creating a page
fn templates() -> Result<Vec<(&'static str, &'static str, &'static str, PageContent)>> {
    let landing = json!({
        "elements": [
            {
                "id": "hero",
                "type": "hero",
                "heading": "Build your digital presence with IeNet",
                "subheading": "Websites, hosting and security from one team",
                "ctaLabel": "Get a quote",
                "ctaHref": "/contact"
            },
            {
                "id": "intro",
                "type": "section",
                "children": [
                    { "id": "intro-heading", "type": "heading", "text": "What we do", "level": 2 },
                    { "id": "intro-text", "type": "text", "text": "Describe your offer here." }
                ]
            },
            {
                "id": "closing-cta",
                "type": "cta",
                "heading": "Ready to start?",
                "buttonLabel": "Contact us",
                "buttonHref": "/contact"
            }
        ]
    });

    let service_page = json!({
        "elements": [
            { "id": "title", "type": "heading", "text": "Service name", "level": 1 },
            { "id": "summary", "type": "text", "text": "One paragraph summary of the service." },
            {
                "id": "benefits",
                "type": "list",
                "items": ["First benefit", "Second benefit", "Third benefit"]
            },
            {
                "id": "faq",
                "type": "faq",
                "items": [
                    { "question": "How long does it take?", "answer": "Most projects ship in 4 to 8 weeks." }
                ]
            }
        ]
    });

    let mut out = Vec::new();
    for (name, category, description, body) in [
        ("Landing Page", "marketing", "Hero, intro section and closing call to action", landing),
        ("Service Page", "services", "Service summary with benefits and FAQ", service_page),
    ] {
        let content: PageContent =
            serde_json::from_value(body).with_context(|| format!("template {name}"))?;
        content
            .check()
            .map_err(|e| anyhow::anyhow!("template {name}: {e}"))?;
        out.push((name, category, description, content));
    }
    Ok(out)
}

async fn reset(tx: &mut Transaction<'_, MySql>) -> Result<()> {
    // Children before parents; the catalog FKs are RESTRICT
    for table in [
        "features",
        "services",
        "service_categories",
        "projects",
        "content_templates",
    ] {
        let result = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **tx)
            .await
            .with_context(|| format!("clearing {table}"))?;
        info!("Cleared {} rows from {}", result.rows_affected(), table);
    }
    Ok(())
}

async fn seed(tx: &mut Transaction<'_, MySql>) -> Result<()> {
    let mut category_ids = Vec::new();
    for (i, c) in categories().iter().enumerate() {
        let id = sqlx::query(
            r#"
            INSERT INTO service_categories
                (name, slug, description, icon, color, meta_title, meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, TRUE, ?)
            "#,
        )
        .bind(c.name)
        .bind(c.slug)
        .bind(c.description)
        .bind(c.icon)
        .bind(c.color)
        .bind(c.meta_title)
        .bind(c.meta_description)
        .bind(i as i32 + 1)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("inserting category {}", c.slug))?
        .last_insert_id() as i64;
        category_ids.push((c.slug, id));
    }
    info!("Inserted {} service categories", category_ids.len());

    let mut service_ids = Vec::new();
    let mut order_in_category: Vec<(&str, i32)> = Vec::new();
    for s in services() {
        let category_id = lookup(&category_ids, s.category)?;
        let sort_order = next_order(&mut order_in_category, s.category);
        let id = sqlx::query(
            r#"
            INSERT INTO services
                (category_id, name, slug, description, short_description, icon, meta_title,
                 meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?)
            "#,
        )
        .bind(category_id)
        .bind(s.name)
        .bind(s.slug)
        .bind(s.description)
        .bind(s.short_description)
        .bind(s.icon)
        .bind(s.meta_title)
        .bind(s.description)
        .bind(sort_order)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("inserting service {}", s.slug))?
        .last_insert_id() as i64;
        service_ids.push((s.slug, id));
    }
    info!("Inserted {} services", service_ids.len());

    let features = features();
    for (i, f) in features.iter().enumerate() {
        let service_id = lookup(&service_ids, f.service)?;
        sqlx::query(
            r#"
            INSERT INTO features
                (service_id, name, slug, description, technical_details, benefits, meta_title,
                 meta_description, is_active, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?)
            "#,
        )
        .bind(service_id)
        .bind(f.name)
        .bind(f.slug)
        .bind(f.description)
        .bind(f.technical_details)
        .bind(f.benefits)
        .bind(f.meta_title)
        .bind(f.description)
        .bind(i as i32 + 1)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("inserting feature {}", f.slug))?;
    }
    info!("Inserted {} features", features.len());

    let projects = projects();
    for (i, p) in projects.iter().enumerate() {
        let (y, m, d) = p.completed;
        let completion = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .with_context(|| format!("completion date of {}", p.slug))?;
        sqlx::query(
            r#"
            INSERT INTO projects
                (title, slug, description, short_description, image_url, technologies, category,
                 client_name, completion_date, meta_title, meta_description, is_active,
                 is_featured, sort_order)
            VALUES (?, ?, ?, ?, ?, ?, 'Management System', ?, ?, ?, ?, TRUE, ?, ?)
            "#,
        )
        .bind(p.title)
        .bind(p.slug)
        .bind(p.description)
        .bind(p.short_description)
        .bind(p.image_url)
        .bind(sqlx::types::Json(p.technologies))
        .bind(p.client_name)
        .bind(completion)
        .bind(format!("{} | Case Study", p.title))
        .bind(p.short_description)
        .bind(p.featured)
        .bind(i as i32 + 1)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("inserting project {}", p.slug))?;
    }
    info!("Inserted {} projects", projects.len());

    let templates = templates()?;
    for (name, category, description, content) in &templates {
        sqlx::query(
            r#"
            INSERT INTO content_templates (name, description, content, category, is_active)
            VALUES (?, ?, ?, ?, TRUE)
            "#,
        )
        .bind(*name)
        .bind(*description)
        .bind(sqlx::types::Json(content))
        .bind(*category)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("inserting template {name}"))?;
    }
    info!("Inserted {} content templates", templates.len());

    Ok(())
}

fn lookup(ids: &[(&str, i64)], slug: &str) -> Result<i64> {
    ids.iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, id)| *id)
        .with_context(|| format!("unknown parent slug {slug}"))
}

fn next_order<'a>(counters: &mut Vec<(&'a str, i32)>, key: &'a str) -> i32 {
    match counters.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => {
            *n += 1;
            *n
        }
        None => {
            counters.push((key, 1));
            1
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    if let Some(url) = args.database_url {
        config.url = url;
    }

    info!("Seeding {}", config.redacted_url());
    let pool = database::create_pool(&config).await?;

    let mut tx = pool.begin().await?;
    if args.reset {
        reset(&mut tx).await?;
    }
    seed(&mut tx).await?;
    tx.commit().await?;

    info!("Seeding complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ienet_core::shared::validation::SLUG_REGEX;
    use std::collections::HashSet;

    #[test]
    fn seed_slugs_are_valid_and_unique() {
        let mut seen = HashSet::new();
        for slug in categories().iter().map(|c| c.slug) {
            assert!(SLUG_REGEX.is_match(slug), "{slug}");
            assert!(seen.insert(slug));
        }
        for slug in projects().iter().map(|p| p.slug) {
            assert!(SLUG_REGEX.is_match(slug), "{slug}");
        }
        for s in services() {
            assert!(SLUG_REGEX.is_match(s.slug), "{}", s.slug);
            assert!(seen.contains(s.category), "{} has unknown category", s.slug);
        }
    }

    #[test]
    fn features_reference_seeded_services() {
        let services: HashSet<_> = services().iter().map(|s| s.slug).collect();
        for f in features() {
            assert!(services.contains(f.service), "{}", f.slug);
            assert!(SLUG_REGEX.is_match(f.slug));
        }
    }

    #[test]
    fn templates_are_well_formed() {
        let templates = templates().unwrap();
        assert_eq!(templates.len(), 2);
        assert!(templates.iter().all(|(_, _, _, content)| !content.is_empty()));
    }

    #[test]
    fn sort_order_counts_per_parent() {
        let mut counters = Vec::new();
        assert_eq!(next_order(&mut counters, "a"), 1);
        assert_eq!(next_order(&mut counters, "a"), 2);
        assert_eq!(next_order(&mut counters, "b"), 1);
    }
}
