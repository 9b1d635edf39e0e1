//! Canned reply text
//!
//! Written in the markup dialect understood by [`crate::markup`].

pub const GREETING: &str = "Hi! I'm your SEO & Web Performance Assistant. Ask me anything about Syed Muhammad Waqas's SEO expertise, ranking strategies, PageSpeed optimization, or web development skills!";

pub const EXPERIENCE: &str = "Syed Muhammad Waqas has **5+ years of proven SEO & Web Development experience**:

**Freelance SEO Expert & Full-Stack Developer** (2020–Present)
• Ranked 50+ websites in top 10 Google positions
• Achieved 95%–100% Google PageSpeed scores on 100+ projects
• Fixed thousands of Google Search Console errors (crawl, indexing, mobile usability, Core Web Vitals)
• Built & optimized 40+ WordPress and Next.js websites
• Mastered fast indexing techniques – new pages indexed in under 24 hours
• Removed spam/backlink penalties and recovered lost traffic for multiple sites
• Expert in schema markup, header tags, internal linking, and technical audits";

pub const SKILLS: &str = "Waqas specializes in real, results-driven SEO & development:

**Core SEO Skills**
• Advanced Keyword Research & Competitor Analysis
• Google Search Console & Analytics Mastery
• Technical SEO Audits & Error Resolution
• Schema Markup (JSON-LD) Implementation
• Core Web Vitals & PageSpeed Optimization (95%–100%)
• Fast Indexing + Spammy Page Unindexing
• High-Quality Link Building & Outreach

**Web Development**
• WordPress + Elementor (Custom Themes & Plugins)
• Next.js + React Applications
• Vercel & GitHub Deployment
• Clean, Semantic HTML/CSS/JS

**Content & Strategy**
• 100% Unique, Human-Written, AI-Undetectable Content
• On-Page SEO Optimization
• Conversion-Focused Copywriting

Tools: Ahrefs, SEMrush, Screaming Frog, GSC, GA4, PageSpeed Insights, Surfer SEO, Rank Math, Yoast, AI tools (used smartly, never for final content)";

pub const PROJECTS: &str = "Here are some of Waqas's successful SEO & web projects:

**Local Business SEO Success**
→ Took a Karachi-based client from 0 to 3,000+ monthly organic visitors in 6 months
→ #1–3 rankings for 50+ high-competition local keywords

**E-commerce Site Recovery**
→ Recovered a penalized online store – traffic restored +300% in 4 months
→ Removed manual penalty + cleaned toxic backlinks

**Next.js Portfolio & Tools**
→ https://waqasbukhari.vercel.app (this site – 99/100 PageSpeed mobile)
→ Multiple client sites scoring 95–100 on PageSpeed (WordPress & Next.js)

**Speed Optimization Projects**
→ Converted slow WordPress sites (40–60 scores) → 95–100 in under 7 days
→ Implemented lazy loading, WebP, caching, CDN, code splitting

Every project is backed by data, screenshots, and real ranking improvements.";

pub const SEO_EXPERTISE: &str = "Yes! I specialize in complete SEO domination:

• Full Technical + On-Page + Off-Page SEO
• Keyword research with commercial intent
• Site structure & internal linking strategy
• Content gap analysis & optimization
• Monthly ranking & traffic reports
• White-hat link building that actually works
• Guaranteed traffic growth or work until achieved

Currently helping businesses in Pakistan, USA, UK & UAE rank higher and get more customers.

Ready to 10x your organic traffic? Let’s talk strategy!";

pub const TECHNICAL_SEO: &str = "I fix everything Google cares about:

Core Web Vitals Optimization (LCP, CLS, FID/INP)
• 95%–100% PageSpeed scores (mobile & desktop)
• Crawl error & indexing issue resolution
• XML sitemaps, robots.txt, canonical tags
• Schema markup (FAQ, Product, LocalBusiness, Article)
• Mobile usability & HTTPS fixes
• Image optimization, lazy loading, font optimization
• Migration without traffic loss

Most sites see massive improvements within 7–14 days.

Send me your URL and I’ll give you a free mini-audit!";

pub const LINK_BUILDING: &str = "My link building is safe, powerful, and sustainable:

• Guest posts on real authority sites (DA40–DR80+)
• Niche edits & curated links
• HARO (Help A Reporter Out) responses
• Resource page link building
• Broken link building
• Skyscraper technique
• Zero PBNs or spam – only Google-safe methods

Average result: +15–30 DR points in 4–6 months
Many clients saw 200%–500% traffic increase from links alone.

Want a custom link building strategy? Just say the word!";

pub const CHAT_FALLBACK: &str = "I can help you with SEO strategy, technical fixes, PageSpeed optimization, link building, content, or full website audits. Just tell me your goal!";

pub const TRIGGER_FALLBACK: &str =
    "I'm ready to help with your SEO! Tell me about your website and goals.";
