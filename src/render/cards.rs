// Blog card templates
use crate::analyzer::classify_outcome;
use crate::config::{AppConfig, ReportLink, StaticCard};
use crate::model::{PriceRecord, Trend};
use crate::render::table::price_section;
use crate::utils::{escape_html, month_label, week_of_label};
use chrono::NaiveDate;

/// Everything needed to render one run's cards.
pub struct BlogCards<'a> {
    pub month: String,
    pub week_of: String,
    pub records: Option<&'a [PriceRecord]>,
    pub trend: Trend,
    pub config: &'a AppConfig,
}

impl<'a> BlogCards<'a> {
    pub fn new(config: &'a AppConfig, records: Option<&'a [PriceRecord]>, today: NaiveDate) -> Self {
        Self {
            month: month_label(today),
            week_of: week_of_label(today),
            records,
            trend: classify_outcome(records),
            config,
        }
    }

    pub fn retail_title(&self) -> String {
        format!("Retail Grocery Report \u{2014} {}", self.month)
    }

    pub fn retail_meta(&self) -> String {
        format!("{} \u{2022} Market Data", self.month)
    }

    pub fn outlook_title(&self) -> String {
        format!("USDA Market Outlook \u{2014} {}", self.month)
    }

    pub fn outlook_meta(&self) -> String {
        format!("{} \u{2022} Industry", self.month)
    }

    pub fn static_cards(&self) -> &[StaticCard] {
        &self.config.static_cards
    }

    pub fn titles(&self) -> Vec<String> {
        let mut titles = vec![self.retail_title(), self.outlook_title()];
        titles.extend(self.static_cards().iter().map(|c| c.title.clone()));
        titles
    }

    /// The full card markup that goes inside the blog grid.
    pub fn render_html(&self) -> String {
        let mut cards = vec![self.render_retail(), self.render_outlook()];
        cards.extend(self.static_cards().iter().map(render_static));
        cards.join("\n")
    }

    fn render_retail(&self) -> String {
        format!(
            r#"        <div class="blog-card">
          <div class="blog-card-img">
            <img src="{image}" alt="Retail grocery report">
          </div>
          <div class="blog-card-body">
            <div class="blog-meta">{month} &bull; Market Data</div>
            <h3>Retail Grocery Report &mdash; {month}</h3>
            <p>Latest average U.S. retail prices from the Bureau of Labor Statistics.</p>
{table}
            <div class="blog-updated">Updated: {week_of}</div>
          </div>
        </div>"#,
            image = escape_html(&self.config.retail_image),
            month = self.month,
            table = price_section(self.records),
            week_of = self.week_of,
        )
    }

    fn render_outlook(&self) -> String {
        format!(
            r#"        <div class="blog-card">
          <div class="blog-card-img usda-logo-bg">
            <img src="{image}" alt="USDA Market News">
          </div>
          <div class="blog-card-body">
            <div class="blog-meta">{month} &bull; Industry</div>
            <h3>USDA Market Outlook &mdash; {month}</h3>
            <p>{trend}</p>
{links}            <div class="blog-updated">Updated: {week_of}</div>
          </div>
        </div>"#,
            image = escape_html(&self.config.outlook_image),
            month = self.month,
            trend = self.trend.outlook(),
            links = render_report_links(&self.config.report_links),
            week_of = self.week_of,
        )
    }
}

fn render_report_links(links: &[ReportLink]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let anchors: String = links
        .iter()
        .map(|l| {
            format!(
                "              <a href=\"{}\" target=\"_blank\" class=\"report-link\">{}</a>\n",
                escape_html(&l.url),
                escape_html(&l.label)
            )
        })
        .collect();
    format!(
        "            <div class=\"report-links\">\n              <h4>National Weekly Retail Activity Reports</h4>\n{anchors}            </div>\n"
    )
}

fn render_static(card: &StaticCard) -> String {
    let img_class = match &card.image_class {
        Some(class) => format!("blog-card-img {}", escape_html(class)),
        None => "blog-card-img".to_string(),
    };
    format!(
        r#"        <div class="blog-card">
          <div class="{img_class}">
            <img src="{image}" alt="{alt}">
          </div>
          <div class="blog-card-body">
            <div class="blog-meta">{meta}</div>
            <h3>{title}</h3>
            <p>{body}</p>
            <div class="blog-updated">Updated: {updated}</div>
          </div>
        </div>"#,
        image = escape_html(&card.image),
        alt = escape_html(&card.image_alt),
        meta = escape_html(&card.meta),
        title = escape_html(&card.title),
        body = escape_html(card.body.as_deref().unwrap_or(&card.summary)),
        updated = escape_html(&card.updated),
    )
}
