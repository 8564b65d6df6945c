//! Element interaction layer.
//!
//! Every operation here is a bounded wait-then-act over a locator:
//! the condition is polled at a fixed interval up to a fixed timeout,
//! then the action runs against the located element. Probe failures
//! (missing element, stale reference) count as "condition not met yet"
//! and are retried until the deadline.

use std::time::{Duration, Instant};

use fantoccini::{
    Locator,
    actions::{InputSource, MouseActions, PointerAction},
    elements::Element,
};
use tokio::time::sleep;

use crate::{
    error::{AutomationError, Result},
    session::Session,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

const CLICK_BY_XPATH: &str = r#"
    var el = document.evaluate(arguments[0], document, null,
        XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
    if (el) { el.click(); return true; }
    return false;
"#;

const SCROLL_BY_XPATH: &str = r#"
    var el = document.evaluate(arguments[0], document, null,
        XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
    if (el) { el.scrollIntoView({block: 'center'}); return true; }
    return false;
"#;

fn describe(condition: &str, locator: Locator<'_>) -> String {
    format!("{condition} {locator:?}")
}

/// A member of a located result set: reports whether it is currently
/// shown and yields its text. The interaction layer reads real elements
/// through this seam; unit tests substitute fakes.
#[allow(async_fn_in_trait)]
trait VisibleText {
    async fn shown(&self) -> Result<bool>;
    async fn read_text(&self) -> Result<String>;
}

impl VisibleText for Element {
    async fn shown(&self) -> Result<bool> {
        Ok(self.is_displayed().await?)
    }

    async fn read_text(&self) -> Result<String> {
        Ok(self.text().await?)
    }
}

/// Text of the currently shown subset, in input order. A member whose
/// probe fails (typically gone stale between the find and the read) is
/// skipped, never propagated.
async fn visible_texts<E: VisibleText>(elements: &[E]) -> Vec<String> {
    let mut texts = Vec::new();
    for element in elements {
        if !element.shown().await.unwrap_or(false) {
            continue;
        }
        if let Ok(text) = element.read_text().await {
            texts.push(text);
        }
    }
    texts
}

impl Session {
    /// Polls `probe` until it yields a value or the deadline passes.
    async fn wait_until<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let deadline = Instant::now() + WAIT_TIMEOUT;
        loop {
            if let Some(value) = probe().await {
                return Ok(value);
            }
            if Instant::now() >= deadline {
                return Err(AutomationError::Timeout {
                    what: what.to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Waits for the element to be present, displayed and enabled, then clicks it.
    pub async fn click(&self, locator: Locator<'_>) -> Result<()> {
        let what = describe("clickable element", locator);
        let element = self
            .wait_until(&what, move || async move {
                let element = self.client().find(locator).await.ok()?;
                let displayed = element.is_displayed().await.unwrap_or(false);
                let enabled = element.is_enabled().await.unwrap_or(false);
                (displayed && enabled).then_some(element)
            })
            .await?;
        element.click().await?;
        Ok(())
    }

    /// Waits for the element to be clickable, then clicks it through an
    /// injected script. Some overlaid controls swallow synthetic
    /// WebDriver clicks but react to a DOM-level click.
    pub async fn js_click(&self, xpath: &str) -> Result<()> {
        let locator = Locator::XPath(xpath);
        let what = describe("clickable element", locator);
        self.wait_until(&what, move || async move {
            let element = self.client().find(locator).await.ok()?;
            let displayed = element.is_displayed().await.unwrap_or(false);
            let enabled = element.is_enabled().await.unwrap_or(false);
            (displayed && enabled).then_some(())
        })
        .await?;

        self.execute(
            CLICK_BY_XPATH,
            vec![serde_json::Value::String(xpath.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Waits for the element to be visible, then types into it.
    pub async fn send_keys(&self, locator: Locator<'_>, text: &str) -> Result<()> {
        let what = describe("visible element", locator);
        let element = self
            .wait_until(&what, move || async move {
                let element = self.client().find(locator).await.ok()?;
                element
                    .is_displayed()
                    .await
                    .unwrap_or(false)
                    .then_some(element)
            })
            .await?;
        element.send_keys(text).await?;
        Ok(())
    }

    /// Waits for the element to be visible, then returns its text.
    pub async fn text(&self, locator: Locator<'_>) -> Result<String> {
        let what = describe("visible element", locator);
        let element = self
            .wait_until(&what, move || async move {
                let element = self.client().find(locator).await.ok()?;
                element
                    .is_displayed()
                    .await
                    .unwrap_or(false)
                    .then_some(element)
            })
            .await?;
        Ok(element.text().await?)
    }

    /// Waits until every match is visible, then returns their text in
    /// document order.
    pub async fn texts_of_all(&self, locator: Locator<'_>) -> Result<Vec<String>> {
        let what = describe("all matches visible for", locator);
        let elements = self
            .wait_until(&what, move || async move {
                let elements = self.client().find_all(locator).await.ok()?;
                if elements.is_empty() {
                    return None;
                }
                for element in &elements {
                    if !element.is_displayed().await.ok()? {
                        return None;
                    }
                }
                Some(elements)
            })
            .await?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    /// Waits for any match to be present, then returns the text of the
    /// currently visible subset, in document order. Yields an empty list
    /// instead of an error when nothing shows up, and skips any match
    /// that goes stale mid-read; result sets like a recommendations
    /// carousel legitimately keep some matches hidden.
    pub async fn texts_of_visible(&self, locator: Locator<'_>) -> Result<Vec<String>> {
        let what = describe("any match present for", locator);
        let found = self
            .wait_until(&what, move || async move {
                let elements = self.client().find_all(locator).await.ok()?;
                (!elements.is_empty()).then_some(elements)
            })
            .await;

        let elements = match found {
            Ok(elements) => elements,
            Err(AutomationError::Timeout { .. }) => return Ok(Vec::new()),
            Err(other) => return Err(other),
        };

        Ok(visible_texts(&elements).await)
    }

    /// Waits for the element to be visible. Errors on timeout, so a
    /// `false` can never be silently asserted on.
    pub async fn is_displayed(&self, locator: Locator<'_>) -> Result<bool> {
        let what = describe("visible element", locator);
        self.wait_until(&what, move || async move {
            let element = self.client().find(locator).await.ok()?;
            element.is_displayed().await.unwrap_or(false).then_some(true)
        })
        .await
    }

    /// Single immediate lookup; absence is an answer, not an error.
    pub async fn is_present(&self, locator: Locator<'_>) -> bool {
        self.client().find(locator).await.is_ok()
    }

    /// Immediate count of current matches.
    pub async fn count(&self, locator: Locator<'_>) -> usize {
        self.client()
            .find_all(locator)
            .await
            .map(|elements| elements.len())
            .unwrap_or(0)
    }

    /// Waits for visibility, then moves the pointer onto the element's
    /// center. A real pointer move, so CSS :hover menus open just as
    /// they do under a mouse.
    pub async fn hover(&self, locator: Locator<'_>) -> Result<()> {
        let what = describe("visible element", locator);
        let element = self
            .wait_until(&what, move || async move {
                let element = self.client().find(locator).await.ok()?;
                element
                    .is_displayed()
                    .await
                    .unwrap_or(false)
                    .then_some(element)
            })
            .await?;

        let pointer = MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element,
            duration: None,
            x: 0.0,
            y: 0.0,
        });
        self.client().perform_actions(pointer).await?;
        Ok(())
    }

    /// Immediate lookup, then scrolls the element into view. Errors if
    /// the element is not on the page.
    pub async fn scroll_into_view(&self, xpath: &str) -> Result<()> {
        self.client().find(Locator::XPath(xpath)).await?;
        self.execute(
            SCROLL_BY_XPATH,
            vec![serde_json::Value::String(xpath.to_string())],
        )
        .await?;
        Ok(())
    }

    /// Waits until the element is absent or no longer displayed.
    pub async fn wait_for_gone(&self, locator: Locator<'_>) -> Result<()> {
        let what = describe("disappearance of", locator);
        self.wait_until(&what, move || async move {
            match self.client().find(locator).await {
                Ok(element) => match element.is_displayed().await {
                    Ok(true) => None,
                    // Hidden, or went stale between find and the check.
                    _ => Some(()),
                },
                Err(_) => Some(()),
            }
        })
        .await
    }

    /// Waits until the document reports a complete ready state.
    pub async fn wait_for_page_ready(&self) -> Result<()> {
        self.wait_until("document.readyState == 'complete'", move || async move {
            let state = self
                .client()
                .execute("return document.readyState;", vec![])
                .await
                .ok()?;
            (state.as_str() == Some("complete")).then_some(())
        })
        .await
    }
}
