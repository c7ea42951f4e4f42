//! Tech stack icons from the devicon CDN, with a local fallback.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// Served when a technology has no known or reachable icon.
pub const FALLBACK_ICON: &str = "/tech.svg";

/// A slow CDN must not hold a dashboard render for the shared client's full timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Normalized tech name → devicon slug.
const TECH_ICON_SLUGS: &[(&str, &str)] = &[
    ("react", "react"),
    ("reactjs", "react"),
    ("next", "nextjs"),
    ("nextjs", "nextjs"),
    ("vue", "vuejs"),
    ("vuejs", "vuejs"),
    ("angular", "angularjs"),
    ("angularjs", "angularjs"),
    ("svelte", "svelte"),
    ("nuxt", "nuxtjs"),
    ("ember", "ember"),
    ("backbone", "backbonejs"),
    ("jquery", "jquery"),
    ("node", "nodejs"),
    ("nodejs", "nodejs"),
    ("express", "express"),
    ("nest", "nestjs"),
    ("nestjs", "nestjs"),
    ("javascript", "javascript"),
    ("js", "javascript"),
    ("typescript", "typescript"),
    ("ts", "typescript"),
    ("html", "html5"),
    ("html5", "html5"),
    ("css", "css3"),
    ("css3", "css3"),
    ("sass", "sass"),
    ("scss", "sass"),
    ("less", "less"),
    ("tailwind", "tailwindcss"),
    ("tailwindcss", "tailwindcss"),
    ("bootstrap", "bootstrap"),
    ("redux", "redux"),
    ("graphql", "graphql"),
    ("apollo", "apollographql"),
    ("python", "python"),
    ("django", "django"),
    ("flask", "flask"),
    ("fastapi", "fastapi"),
    ("java", "java"),
    ("spring", "spring"),
    ("springboot", "spring"),
    ("kotlin", "kotlin"),
    ("swift", "swift"),
    ("go", "go"),
    ("golang", "go"),
    ("rust", "rust"),
    ("c", "c"),
    ("c++", "cplusplus"),
    ("cpp", "cplusplus"),
    ("c#", "csharp"),
    ("csharp", "csharp"),
    (".net", "dot-net"),
    ("dotnet", "dot-net"),
    ("php", "php"),
    ("laravel", "laravel"),
    ("ruby", "ruby"),
    ("rails", "rails"),
    ("rubyonrails", "rails"),
    ("mongodb", "mongodb"),
    ("mongo", "mongodb"),
    ("mongoose", "mongoose"),
    ("mysql", "mysql"),
    ("postgresql", "postgresql"),
    ("postgres", "postgresql"),
    ("sqlite", "sqlite"),
    ("redis", "redis"),
    ("firebase", "firebase"),
    ("prisma", "prisma"),
    ("docker", "docker"),
    ("kubernetes", "kubernetes"),
    ("k8s", "kubernetes"),
    ("aws", "amazonwebservices"),
    ("amazonwebservices", "amazonwebservices"),
    ("azure", "azure"),
    ("gcp", "googlecloud"),
    ("googlecloud", "googlecloud"),
    ("digitalocean", "digitalocean"),
    ("vercel", "vercel"),
    ("netlify", "netlify"),
    ("git", "git"),
    ("github", "github"),
    ("gitlab", "gitlab"),
    ("bitbucket", "bitbucket"),
    ("jenkins", "jenkins"),
    ("terraform", "terraform"),
    ("nginx", "nginx"),
    ("linux", "linux"),
    ("bash", "bash"),
    ("figma", "figma"),
    ("webpack", "webpack"),
    ("vite", "vitejs"),
    ("babel", "babel"),
    ("jest", "jest"),
    ("mocha", "mocha"),
    ("cypress", "cypressio"),
    ("flutter", "flutter"),
    ("dart", "dart"),
    ("reactnative", "react"),
    ("three", "threejs"),
    ("threejs", "threejs"),
    ("d3", "d3js"),
    ("tensorflow", "tensorflow"),
    ("pytorch", "pytorch"),
];

/// One resolved icon, in the order the stack was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechIcon {
    pub tech: String,
    pub url: String,
}

/// Lowercase, strip a trailing `.js`, drop whitespace, then look up the slug.
pub fn normalize_tech_name(tech: &str) -> Option<&'static str> {
    let lower = tech.to_lowercase();
    let trimmed = lower.strip_suffix(".js").unwrap_or(&lower);
    let key: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    TECH_ICON_SLUGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, slug)| *slug)
}

/// Resolves icon URLs, probing the CDN with `HEAD` before trusting them.
#[derive(Clone)]
pub struct TechIconResolver {
    client: Client,
    base_url: String,
}

impl TechIconResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn icon_url(&self, slug: &str) -> String {
        format!("{}/{slug}/{slug}-original.svg", self.base_url)
    }

    /// Every name gets a usable URL, in input order. Each distinct slug is
    /// probed once, however many spellings of it appear; probes run concurrently.
    pub async fn tech_logos(&self, techs: &[String]) -> Vec<TechIcon> {
        let slugs: HashSet<&'static str> =
            techs.iter().filter_map(|tech| normalize_tech_name(tech)).collect();

        let resolved: HashMap<&'static str, String> =
            join_all(slugs.into_iter().map(|slug| async move {
                let candidate = self.icon_url(slug);
                if self.icon_exists(&candidate).await {
                    (slug, candidate)
                } else {
                    (slug, FALLBACK_ICON.to_string())
                }
            }))
            .await
            .into_iter()
            .collect();

        techs
            .iter()
            .map(|tech| TechIcon {
                tech: tech.clone(),
                url: normalize_tech_name(tech)
                    .and_then(|slug| resolved.get(slug).cloned())
                    .unwrap_or_else(|| FALLBACK_ICON.to_string()),
            })
            .collect()
    }

    async fn icon_exists(&self, url: &str) -> bool {
        match self.client.head(url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Icon probe failed for {url}: {e}");
                false
            }
        }
    }
}
