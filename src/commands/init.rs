//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r##"# newsbox configuration

# Site
title: Trystage
language: zh        # zh | en
theme: dark         # dark | light

# Directory
page: index.html
public_dir: public
languages_dir: languages
assets:
  - css
  - js
  - images
  - news
  - favicon.ico

# News
news:
  source: news      # a directory, or an http(s) base URL
  files:
    - news1.md
    - news2.md
    - news3.md
  container_id: news-container
  title_prefix: "# "
  date_label: "发布时间："
  timeout_secs: 30
"##;

const PAGE: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trystage</title>
    <link rel="stylesheet" href="css/style.css">
</head>
<body>
    <nav class="navbar">
        <ul class="nav-menu">
            <li><a href="#home" data-i18n="nav.home">首页</a></li>
            <li><a href="#developers" data-i18n="nav.developers">开发者</a></li>
            <li><a href="#gallery" data-i18n="nav.gallery">项目画廊</a></li>
        </ul>
        <button id="lang-toggle">EN</button>
    </nav>

    <section id="home" class="hero">
        <p class="hero-subtitle" data-i18n="hero.subtitle">一个为创造与竞技而生的社区。</p>
    </section>

    <section id="news" class="news">
        <h2 data-i18n="news.title">最新新闻</h2>
        <div id="news-container" class="news-grid">
            <p data-i18n="loading">加载中...</p>
        </div>
    </section>

    <footer>
        <p data-i18n="footer.slogan">为世界而诞生</p>
    </footer>
</body>
</html>
"##;

const STYLE: &str = r#"body { margin: 0; font-family: sans-serif; background: #111; color: #eee; }
[data-theme="light"] body { background: #fafafa; color: #222; }
.news-grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); }
.news-box { padding: 1.25rem; border-radius: 8px; background: rgba(255, 255, 255, 0.06); }
.news-date { margin-top: 1rem; font-size: 0.85rem; opacity: 0.7; }
"#;

const NEWS: [(&str, &str); 3] = [
    (
        "news1.md",
        "# 服务器正式开放\n发布时间：2024-01-01\n\n欢迎来到 **Trystage**！\n\n所有玩家现在都可以加入。",
    ),
    (
        "news2.md",
        "# 起床战争更新\n发布时间：2024-02-15\n\n新增 *两张* 竞技地图。",
    ),
    (
        "news3.md",
        "# 社区活动\n\n本周末举办建筑比赛，欢迎参加。",
    ),
];

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("news"))?;
    fs::create_dir_all(target_dir.join("css"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(target_dir.join("index.html"), PAGE)?;
    fs::write(target_dir.join("css/style.css"), STYLE)?;

    for (name, text) in NEWS {
        fs::write(target_dir.join("news").join(name), text)?;
    }

    Ok(())
}
