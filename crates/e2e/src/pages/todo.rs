//! Page object for the TodoMVC demo application

use tracing::debug;

use refresh_driver::{Driver, DriverResult, Locator};

/// The application's three routing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}

// Named locators, resolved fresh on every use.

fn entry_field() -> Locator {
    Locator::placeholder("What needs to be done?")
}

fn titles() -> Locator {
    Locator::test_id("todo-title")
}

fn rows() -> Locator {
    Locator::test_id("todo-item")
}

fn row(index: usize) -> Locator {
    rows().nth(index)
}

fn row_toggle(index: usize) -> Locator {
    row(index).within(Locator::role("checkbox"))
}

fn row_label(index: usize) -> Locator {
    row(index).within(Locator::css("label"))
}

fn edit_box(index: usize) -> Locator {
    row(index).within(Locator::role_named("textbox", "Edit"))
}

fn toggle_all() -> Locator {
    Locator::label("Mark all as complete")
}

fn counter() -> Locator {
    Locator::test_id("todo-count")
}

fn clear_completed_button() -> Locator {
    Locator::role_named("button", "Clear completed")
}

fn filter_link(filter: Filter) -> Locator {
    Locator::role_named("link", filter.label())
}

/// Semantic wrapper over the todo list screen. Stateless: holds only the
/// driver binding, queries the live page for everything else.
pub struct TodoPage<D> {
    driver: D,
}

impl<D: Driver> TodoPage<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    // Mutating actions. Each returns once the engine confirms dispatch; the
    // following assertion is responsible for waiting out UI settling.

    /// Create one todo item by typing into the entry field and committing
    /// with Enter.
    pub async fn add(&self, title: &str) -> DriverResult<()> {
        debug!(title, "add todo");
        let entry = entry_field();
        self.driver.fill(&entry, title).await?;
        self.driver.press(&entry, "Enter").await
    }

    pub async fn add_all(&self, titles: &[&str]) -> DriverResult<()> {
        for title in titles {
            self.add(title).await?;
        }
        Ok(())
    }

    /// Mark the item at `index` complete.
    pub async fn toggle(&self, index: usize) -> DriverResult<()> {
        self.driver.check(&row_toggle(index)).await
    }

    /// Clear the completed mark on the item at `index`.
    pub async fn untoggle(&self, index: usize) -> DriverResult<()> {
        self.driver.uncheck(&row_toggle(index)).await
    }

    pub async fn mark_all_complete(&self) -> DriverResult<()> {
        self.driver.check(&toggle_all()).await
    }

    pub async fn unmark_all_complete(&self) -> DriverResult<()> {
        self.driver.uncheck(&toggle_all()).await
    }

    /// Switch the routing filter.
    pub async fn filter(&self, filter: Filter) -> DriverResult<()> {
        debug!(filter = filter.label(), "apply filter");
        self.driver.click(&filter_link(filter)).await
    }

    pub async fn clear_completed(&self) -> DriverResult<()> {
        self.driver.click(&clear_completed_button()).await
    }

    /// Enter edit mode on the item at `index` with the double-activation
    /// gesture. The returned editor is the only way to issue further edit
    /// operations; committing or cancelling consumes it.
    pub async fn begin_edit(&self, index: usize) -> DriverResult<TodoEditor<'_, D>> {
        self.driver.dblclick(&row(index)).await?;
        self.driver.expect_visible(&edit_box(index)).await?;
        Ok(TodoEditor { page: self, index })
    }

    // Queries. Each polls the live page until the expectation holds or the
    // bounded wait elapses.

    /// The exact ordered sequence of visible item titles.
    pub async fn expect_titles(&self, expected: &[&str]) -> DriverResult<()> {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        self.driver.expect_text(&titles(), &expected).await
    }

    pub async fn expect_input_empty(&self) -> DriverResult<()> {
        self.driver.expect_value(&entry_field(), "").await
    }

    /// The "N items left" counter mentions `count`.
    pub async fn expect_counter(&self, count: usize) -> DriverResult<()> {
        self.driver
            .expect_text_contains(&counter(), &count.to_string())
            .await
    }

    pub async fn expect_item_count(&self, count: usize) -> DriverResult<()> {
        self.driver.expect_count(&rows(), count).await
    }

    pub async fn expect_completed(&self, index: usize) -> DriverResult<()> {
        self.driver.expect_class(&row(index), "completed", true).await
    }

    pub async fn expect_active(&self, index: usize) -> DriverResult<()> {
        self.driver.expect_class(&row(index), "completed", false).await
    }

    pub async fn expect_all_completed(&self, count: usize) -> DriverResult<()> {
        for index in 0..count {
            self.expect_completed(index).await?;
        }
        Ok(())
    }

    pub async fn expect_none_completed(&self, count: usize) -> DriverResult<()> {
        for index in 0..count {
            self.expect_active(index).await?;
        }
        Ok(())
    }

    pub async fn expect_toggle_all_checked(&self, checked: bool) -> DriverResult<()> {
        self.driver.expect_checked(&toggle_all(), checked).await
    }

    /// With an empty list the application renders no toggle-all control.
    pub async fn expect_toggle_all_hidden(&self) -> DriverResult<()> {
        self.driver.expect_hidden(&toggle_all()).await
    }

    pub async fn expect_clear_completed_visible(&self) -> DriverResult<()> {
        self.driver.expect_visible(&clear_completed_button()).await
    }

    pub async fn expect_clear_completed_hidden(&self) -> DriverResult<()> {
        self.driver.expect_hidden(&clear_completed_button()).await
    }

    pub async fn expect_filter_selected(&self, filter: Filter) -> DriverResult<()> {
        self.driver
            .expect_class(&filter_link(filter), "selected", true)
            .await
    }
}

/// An item in edit mode. Commit and cancel consume the editor, so nothing
/// can act on a finished edit; row-level assertions are unavailable while
/// the draft is open.
pub struct TodoEditor<'p, D> {
    page: &'p TodoPage<D>,
    index: usize,
}

impl<'p, D: Driver> TodoEditor<'p, D> {
    /// The draft starts out showing the item's current title.
    pub async fn expect_value(&self, text: &str) -> DriverResult<()> {
        self.page.driver.expect_value(&edit_box(self.index), text).await
    }

    /// While editing, the row hides its toggle and label.
    pub async fn expect_row_controls_hidden(&self) -> DriverResult<()> {
        self.page.driver.expect_hidden(&row_toggle(self.index)).await?;
        self.page.driver.expect_hidden(&row_label(self.index)).await
    }

    /// Commit the draft with Enter. The application trims surrounding
    /// whitespace; committing an empty string deletes the item.
    pub async fn commit(self, text: &str) -> DriverResult<()> {
        let target = edit_box(self.index);
        self.page.driver.fill(&target, text).await?;
        self.page.driver.press(&target, "Enter").await
    }

    /// Commit the draft by blurring the field.
    pub async fn commit_via_blur(self, text: &str) -> DriverResult<()> {
        let target = edit_box(self.index);
        self.page.driver.fill(&target, text).await?;
        self.page.driver.dispatch_event(&target, "blur").await
    }

    /// Discard the draft with Escape; the prior title is restored.
    pub async fn cancel(self) -> DriverResult<()> {
        self.page.driver.press(&edit_box(self.index), "Escape").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::mock::MockDriver;
    use test_case::test_case;

    #[tokio::test]
    async fn add_fills_entry_then_presses_enter() {
        let page = TodoPage::new(MockDriver::new());
        page.add("buy some cheese").await.unwrap();
        assert_eq!(
            page.driver().calls(),
            vec![
                "fill placeholder `What needs to be done?` = \"buy some cheese\"",
                "press placeholder `What needs to be done?` Enter",
            ]
        );
    }

    #[tokio::test]
    async fn toggle_targets_the_indexed_row_checkbox() {
        let page = TodoPage::new(MockDriver::new());
        page.toggle(1).await.unwrap();
        page.untoggle(1).await.unwrap();
        assert_eq!(
            page.driver().calls(),
            vec![
                "check test-id `todo-item` #1 > role `checkbox`",
                "uncheck test-id `todo-item` #1 > role `checkbox`",
            ]
        );
    }

    #[tokio::test]
    async fn begin_edit_double_clicks_and_waits_for_the_draft() {
        let page = TodoPage::new(MockDriver::new());
        let editor = page.begin_edit(2).await.unwrap();
        editor.commit("buy some sausages").await.unwrap();
        assert_eq!(
            page.driver().calls(),
            vec![
                "dblclick test-id `todo-item` #2",
                "expect_visible test-id `todo-item` #2 > role `textbox` named `Edit`",
                "fill test-id `todo-item` #2 > role `textbox` named `Edit` = \"buy some sausages\"",
                "press test-id `todo-item` #2 > role `textbox` named `Edit` Enter",
            ]
        );
    }

    #[tokio::test]
    async fn cancel_presses_escape_on_the_draft() {
        let page = TodoPage::new(MockDriver::new());
        let editor = page.begin_edit(0).await.unwrap();
        editor.cancel().await.unwrap();
        let calls = page.driver().calls();
        assert_eq!(
            calls.last().unwrap(),
            "press test-id `todo-item` #0 > role `textbox` named `Edit` Escape"
        );
    }

    #[tokio::test]
    async fn blur_commit_dispatches_a_blur_event() {
        let page = TodoPage::new(MockDriver::new());
        let editor = page.begin_edit(1).await.unwrap();
        editor.commit_via_blur("feed the dog").await.unwrap();
        let calls = page.driver().calls();
        assert_eq!(
            calls.last().unwrap(),
            "dispatch test-id `todo-item` #1 > role `textbox` named `Edit` blur"
        );
    }

    #[test_case(Filter::All, "All")]
    #[test_case(Filter::Active, "Active")]
    #[test_case(Filter::Completed, "Completed")]
    fn filters_expose_their_ui_label(filter: Filter, label: &str) {
        assert_eq!(filter.label(), label);
    }

    #[tokio::test]
    async fn filter_clicks_the_matching_link() {
        let page = TodoPage::new(MockDriver::new());
        page.filter(Filter::Active).await.unwrap();
        assert_eq!(page.driver().calls(), vec!["click role `link` named `Active`"]);
    }

    #[tokio::test]
    async fn expect_titles_passes_the_ordered_sequence() {
        let page = TodoPage::new(MockDriver::new());
        page.expect_titles(&["buy some cheese", "feed the cat"]).await.unwrap();
        assert_eq!(
            page.driver().calls(),
            vec!["expect_text test-id `todo-title` [\"buy some cheese\", \"feed the cat\"]"]
        );
    }

    #[tokio::test]
    async fn mark_all_uses_the_toggle_all_label() {
        let page = TodoPage::new(MockDriver::new());
        page.mark_all_complete().await.unwrap();
        page.unmark_all_complete().await.unwrap();
        assert_eq!(
            page.driver().calls(),
            vec![
                "check label `Mark all as complete`",
                "uncheck label `Mark all as complete`",
            ]
        );
    }
}
