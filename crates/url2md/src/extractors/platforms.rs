// ABOUTME: Built-in per-platform selector profiles and the generic fallback profile.
// ABOUTME: Resolves a URL's host to the first matching profile and chains platform selectors before generic ones.

//! Platform selector profiles.
//!
//! The table is closed and ordered: a host is matched against each platform
//! identifier in declaration order by substring, and the first hit wins.
//! Selector lookups always chain the platform list in front of the generic
//! list, so platform selectors take priority.

use serde::Serialize;

/// Selector lists for one publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteProfile {
    /// Host substring identifying the platform.
    pub domain: &'static str,
    /// Main content candidates, tried in order.
    pub content: &'static [&'static str],
    /// Title candidates, tried in order.
    pub title: &'static [&'static str],
    /// Elements removed before extraction.
    pub noise: &'static [&'static str],
}

pub static PLATFORMS: &[SiteProfile] = &[
    SiteProfile {
        domain: "blog.csdn.net",
        content: &["#content_views"],
        title: &[".title-article", "#articleContentId"],
        noise: &[".hide-article-box", ".blog-tags-box", ".recommend-box"],
    },
    SiteProfile {
        domain: "zhuanlan.zhihu.com",
        content: &[".Post-RichText", ".RichContent-inner"],
        title: &[".Post-Title"],
        noise: &[".ContentItem-actions", ".Reward"],
    },
    SiteProfile {
        domain: "www.zhihu.com",
        content: &[".Post-RichText", ".RichContent-inner"],
        title: &[".Post-Title", ".QuestionHeader-title"],
        noise: &[".ContentItem-actions"],
    },
    SiteProfile {
        domain: "juejin.cn",
        content: &[".article-content", "#article-root"],
        title: &[".article-title"],
        noise: &[".article-suspended-panel", ".recommended-area"],
    },
    SiteProfile {
        domain: "www.jianshu.com",
        content: &["article", "._2rhmJa"],
        title: &["._1RuRku", "h1"],
        noise: &[".note-comment", "._13lIbp"],
    },
    SiteProfile {
        domain: "www.cnblogs.com",
        content: &["#cnblogs_post_body"],
        title: &["#cb_post_title_url", ".postTitle"],
        noise: &[".postDesc", "#blog_post_info_block"],
    },
    SiteProfile {
        domain: "mp.weixin.qq.com",
        content: &["#js_content"],
        title: &["#activity-name"],
        noise: &["#js_pc_qr_code", "#js_profile_qrcode"],
    },
    SiteProfile {
        domain: "sspai.com",
        content: &[".article-body", ".wangEditor-txt"],
        title: &[".title", "h1"],
        noise: &[".relate-reading", ".article-footer"],
    },
];

/// Fallback profile, appended after any platform lists.
pub static GENERIC: SiteProfile = SiteProfile {
    domain: "",
    content: &[
        "article",
        "main",
        ".post-content",
        ".article-content",
        ".entry-content",
        ".post-body",
        "#content",
        ".content",
    ],
    title: &["h1", "title"],
    noise: &[
        "nav", "header", "footer", ".sidebar", ".comment", ".ad", ".share", ".related", "script",
        "style", "noscript",
    ],
};

/// Returns the first platform whose identifier is a substring of the URL's host.
pub fn resolve(url: &str) -> Option<&'static SiteProfile> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    PLATFORMS.iter().find(|p| host.contains(p.domain))
}

/// Ordered selector lists for one document: platform first, generic after.
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    platform: Option<&'static SiteProfile>,
}

impl SelectorChain {
    /// Chain for an explicit platform (or generic-only when `None`).
    pub fn new(platform: Option<&'static SiteProfile>) -> Self {
        Self { platform }
    }

    /// Chain for whatever platform `url` resolves to.
    pub fn for_url(url: &str) -> Self {
        Self::new(resolve(url))
    }

    pub fn platform(&self) -> Option<&'static SiteProfile> {
        self.platform
    }

    pub fn content(&self) -> impl Iterator<Item = &'static str> {
        self.chain(|p| p.content)
    }

    pub fn title(&self) -> impl Iterator<Item = &'static str> {
        self.chain(|p| p.title)
    }

    pub fn noise(&self) -> impl Iterator<Item = &'static str> {
        self.chain(|p| p.noise)
    }

    fn chain(
        &self,
        field: fn(&'static SiteProfile) -> &'static [&'static str],
    ) -> impl Iterator<Item = &'static str> {
        let own: &'static [&'static str] = self.platform.map(field).unwrap_or(&[]);
        own.iter().chain(field(&GENERIC).iter()).copied()
    }
}

/// Every selector string in the built-in tables.
pub fn all_selectors() -> impl Iterator<Item = &'static str> {
    PLATFORMS
        .iter()
        .chain(std::iter::once(&GENERIC))
        .flat_map(|p| p.content.iter().chain(p.title).chain(p.noise))
        .copied()
}
