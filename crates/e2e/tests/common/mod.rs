//! Shared fixtures for the browser scenarios

use refresh_driver::{Driver, Page, Session};
use refresh_e2e::{scenario, storage, PageFactory, SuiteConfig, SuiteResult, TodoPage};

pub const TODO_ITEMS: [&str; 3] = [
    "buy some cheese",
    "feed the cat",
    "book a doctors appointment",
];

pub struct TodoFixture {
    pub session: Session,
    pub factory: PageFactory,
    pub todo: TodoPage<Page>,
    pub config: SuiteConfig,
}

/// Launch a session and land on the todo application.
pub async fn todo_fixture() -> SuiteResult<TodoFixture> {
    scenario::init_tracing();
    let config = SuiteConfig::from_env();
    let session = Session::launch(config.session_config()).await?;
    let factory = PageFactory::new(session.clone())?;
    let todo = factory.todo_page()?;
    todo.driver().navigate(&config.todo_url).await?;
    Ok(TodoFixture { session, factory, todo, config })
}

/// Group setup shared by the completion, editing, and routing suites: the
/// three default items seeded and confirmed in the persisted store.
pub async fn seeded_fixture() -> SuiteResult<TodoFixture> {
    let fixture = todo_fixture().await?;
    fixture.todo.add_all(&TODO_ITEMS).await?;
    storage::wait_for_todo_count(fixture.todo.driver(), TODO_ITEMS.len(), fixture.config.poll_timeout)
        .await?;
    Ok(fixture)
}
