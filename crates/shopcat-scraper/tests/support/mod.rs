//! A scripted, in-memory [`Browser`] and page fixtures shared by the
//! integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use shopcat_core::{Catalogs, StorefrontLayout};
use shopcat_scraper::{
    Browser, CatalogExporter, Condition, EngineSettings, NoPacing, Reporter, ScraperError,
    Session, WaitOutcome,
};

/// What the scripted browser serves and what it has been asked to do.
///
/// `sources` and `heights` advance one entry per call and keep repeating
/// their last entry once exhausted. `clickable` counts how many more waits
/// on a selector succeed. `fail_from` makes an operation (`"page_source"`,
/// `"height"`, `"scroll"`, `"wait"`) return a transport error from its
/// n-th call (0-based) onwards.
#[derive(Debug, Default)]
pub struct Script {
    pub sources: VecDeque<String>,
    pub heights: VecDeque<u64>,
    pub present: HashSet<String>,
    pub clickable: HashMap<String, u32>,
    pub reject_clicks: bool,
    pub fail_from: HashMap<&'static str, usize>,
    pub calls: HashMap<&'static str, usize>,
    pub navigations: Vec<String>,
    pub clicks: Vec<String>,
    pub bottom_scrolls: u32,
    pub closed: bool,
}

impl Script {
    fn record_call(&mut self, operation: &'static str) -> Result<(), ScraperError> {
        let call = self.calls.entry(operation).or_insert(0);
        let index = *call;
        *call += 1;
        match self.fail_from.get(operation) {
            Some(&from) if index >= from => Err(ScraperError::Transport {
                operation: operation.to_owned(),
                reason: "javascript error".to_owned(),
            }),
            _ => Ok(()),
        }
    }
}

fn advance<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedBrowser {
    pub script: Rc<RefCell<Script>>,
}

impl ScriptedBrowser {
    pub fn new(script: Script) -> Self {
        Self {
            script: Rc::new(RefCell::new(script)),
        }
    }

    /// A second handle onto the same script, for inspection after the
    /// browser has been moved into a session.
    pub fn handle(&self) -> Rc<RefCell<Script>> {
        Rc::clone(&self.script)
    }
}

impl Browser for ScriptedBrowser {
    type Element = String;

    async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        self.script.borrow_mut().navigations.push(url.to_owned());
        Ok(())
    }

    async fn page_source(&self) -> Result<String, ScraperError> {
        let mut script = self.script.borrow_mut();
        script.record_call("page_source")?;
        Ok(advance(&mut script.sources).unwrap_or_default())
    }

    async fn wait_until(
        &self,
        condition: Condition<'_>,
        _timeout: Duration,
    ) -> Result<WaitOutcome<String>, ScraperError> {
        let mut script = self.script.borrow_mut();
        script.record_call("wait")?;
        let found = match condition {
            Condition::Present(css) => script.present.contains(css),
            Condition::Clickable(css) => match script.clickable.get_mut(css) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            },
        };
        Ok(found.then(|| condition.selector().to_owned()).into())
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        let mut script = self.script.borrow_mut();
        script.record_call("scroll")?;
        script.bottom_scrolls += 1;
        Ok(())
    }

    async fn scroll_into_view(&self, _element: &String) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn click(&self, element: &String) -> Result<(), ScraperError> {
        let mut script = self.script.borrow_mut();
        if script.reject_clicks {
            return Err(ScraperError::Transport {
                operation: "click".to_owned(),
                reason: "element click intercepted".to_owned(),
            });
        }
        script.clicks.push(element.clone());
        Ok(())
    }

    async fn measured_page_height(&self) -> Result<u64, ScraperError> {
        let mut script = self.script.borrow_mut();
        script.record_call("height")?;
        Ok(advance(&mut script.heights).unwrap_or(1000))
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.script.borrow_mut().closed = true;
        Ok(())
    }
}

/// Keeps a copy of whatever it was asked to export.
#[derive(Debug, Default)]
pub struct RecordingExporter {
    pub exported: RefCell<Option<Catalogs>>,
}

impl CatalogExporter for RecordingExporter {
    type Error = std::io::Error;

    fn export(&self, catalogs: &Catalogs) -> Result<String, Self::Error> {
        *self.exported.borrow_mut() = Some(catalogs.clone());
        Ok("memory".to_owned())
    }
}

pub fn session<'r>(
    browser: ScriptedBrowser,
    reporter: &'r mut dyn Reporter,
) -> Session<'r, ScriptedBrowser> {
    Session::new(
        browser,
        StorefrontLayout::default(),
        EngineSettings::default(),
        Box::new(NoPacing),
        reporter,
    )
    .expect("default layout compiles")
}

pub fn available_card(name: &str, price: &str, sold: &str) -> String {
    format!(
        r#"<div class="shop-search-result-view__item col-xs-2-4"><a href="/p"><div class="line-clamp-2 break-words">{name}</div><div class="flex"><span class="text-xs">Rp</span><span class="truncate">{price}</span></div><div class="row"><div>4.9</div><div>{sold}</div></div></a></div>"#
    )
}

pub fn sold_out_card(name: &str, price: &str, sold: &str) -> String {
    available_card(name, price, sold).replace(
        "shop-search-result-view__item col-xs-2-4",
        "shop-collection-view__item col-xs-2",
    )
}

pub fn listing_page(cards: &[String]) -> String {
    format!(
        r#"<html><body><div class="shop-search-result-view">{}</div></body></html>"#,
        cards.concat()
    )
}

pub fn section(title: &str, cards: &[String]) -> String {
    format!(
        r#"<div class="shopee-header-section"><div class="shopee-header-section__header"><div class="shopee-header-section__header__title"><span>{title}</span></div></div><div class="shopee-header-section__content">{}</div></div>"#,
        cards.concat()
    )
}

pub fn sold_out_page(sections: &[String]) -> String {
    format!(
        r#"<html><body><div class="shop-sold-out">{}</div></body></html>"#,
        sections.concat()
    )
}
