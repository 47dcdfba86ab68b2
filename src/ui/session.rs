use std::cmp::Ordering;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::{Product, ProductFields};
use crate::store::ListQuery;

use super::backend::{CatalogApi, ClientError};

/// Transient feedback stays visible this long.
pub const FEEDBACK_LIFETIME: Duration = Duration::from_secs(3);

const CREATED_FEEDBACK: &str = "Produto adicionado com sucesso!";
const UPDATED_FEEDBACK: &str = "Produto atualizado com sucesso!";
const DELETED_FEEDBACK: &str = "Produto excluído com sucesso!";
const SUBMIT_ERROR_FEEDBACK: &str = "Erro ao adicionar/atualizar produto.";
const DELETE_ERROR_FEEDBACK: &str = "Erro ao excluir produto.";
const LOAD_ERROR_FEEDBACK: &str = "Erro ao carregar produtos.";
const INVALID_PRICE_FEEDBACK: &str = "Preço inválido";
const INVALID_QUANTITY_FEEDBACK: &str = "Quantidade inválida";

/// What a submit will do. Chosen explicitly by the action that opened the
/// editor, never inferred from whichever id happens to be lying around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Update(u64),
}

/// Editable field buffer. Numeric fields stay text until submit, like
/// form inputs do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    Idle,
    Editing { target: EditTarget, form: ProductForm },
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Client-side sort, richer than the single key the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
    expires_at: Instant,
}

/// View state of one catalog client.
///
/// Holds the last fetched snapshot plus everything local: filter text,
/// sort spec, the edit session, the pending delete confirmation, and the
/// transient feedback notice. After any successful mutation the full list
/// is re-fetched; there is no incremental patching. The current time is
/// passed into state-changing calls so expiry is deterministic.
pub struct CatalogSession<A> {
    backend: A,
    products: Vec<Product>,
    pub filter: String,
    pub sort: SortSpec,
    editor: Editor,
    pending_delete: Option<u64>,
    feedback: Option<Feedback>,
}

impl<A: CatalogApi> CatalogSession<A> {
    pub fn new(backend: A) -> Self {
        Self {
            backend,
            products: Vec::new(),
            filter: String::new(),
            sort: SortSpec::default(),
            editor: Editor::Idle,
            pending_delete: None,
            feedback: None,
        }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// The raw snapshot, in the order the server returned it.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Drops feedback past its lifetime.
    pub fn tick(&mut self, now: Instant) {
        if self.feedback.as_ref().is_some_and(|f| now >= f.expires_at) {
            self.feedback = None;
        }
    }

    /// Re-fetches the full list. A failure keeps the previous snapshot
    /// and surfaces a transient notice.
    pub async fn refresh(&mut self, now: Instant) {
        match self.backend.list(ListQuery::default()).await {
            Ok(products) => self.products = products,
            Err(err) => {
                warn!(error = %err, "Failed to load products");
                self.set_feedback(FeedbackKind::Error, LOAD_ERROR_FEEDBACK, now);
            }
        }
    }

    /// The snapshot as the user sees it: local filter, then local sort.
    pub fn visible_products(&self) -> Vec<&Product> {
        let needle = self.filter.to_lowercase();
        let mut rows: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect();
        rows.sort_by(|a, b| {
            let ordering = match self.sort.field {
                SortField::Name => compare_names(a, b),
                SortField::Price => a.price.total_cmp(&b.price),
                SortField::Quantity => a.quantity.cmp(&b.quantity),
            };
            match self.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    /// Opens a blank editor for a new product.
    pub fn begin_create(&mut self) {
        self.pending_delete = None;
        self.editor = Editor::Editing {
            target: EditTarget::Create,
            form: ProductForm::default(),
        };
    }

    /// Opens the editor pre-filled from the snapshot. Returns false when
    /// the id is not in the snapshot.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            debug!(product_id = id, "Edit requested for unknown product");
            return false;
        };
        self.pending_delete = None;
        self.editor = Editor::Editing {
            target: EditTarget::Update(id),
            form: ProductForm::from(product),
        };
        true
    }

    /// The form being edited, if any.
    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        match &mut self.editor {
            Editor::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor = Editor::Idle;
    }

    /// Submits the open editor. On success the list is re-fetched and the
    /// editor closes; on rejection or transport failure the editor comes
    /// back with the form intact.
    pub async fn submit(&mut self, now: Instant) {
        let Editor::Editing { target, form } = self.editor.clone() else {
            return;
        };
        let fields = match parse_form(&form) {
            Ok(fields) => fields,
            Err(message) => {
                self.set_feedback(FeedbackKind::Error, message, now);
                return;
            }
        };
        self.editor = Editor::Submitting;
        let result = match target {
            EditTarget::Create => self.backend.create(fields).await.map(|_| CREATED_FEEDBACK),
            EditTarget::Update(id) => self
                .backend
                .update(id, fields)
                .await
                .map(|_| UPDATED_FEEDBACK),
        };
        match result {
            Ok(message) => {
                self.editor = Editor::Idle;
                self.set_feedback(FeedbackKind::Success, message, now);
                self.refresh(now).await;
            }
            Err(err) => {
                warn!(error = %err, "Submit failed");
                self.editor = Editor::Editing { target, form };
                match err {
                    ClientError::Rejected { message, .. } => {
                        self.set_feedback(FeedbackKind::Error, message, now);
                    }
                    ClientError::Transport(_) => {
                        self.set_feedback(FeedbackKind::Error, SUBMIT_ERROR_FEEDBACK, now);
                    }
                }
            }
        }
    }

    /// First step of deletion: remember the target, touch nothing else.
    pub fn request_delete(&mut self, id: u64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second, confirming step. No-op unless a delete is pending.
    pub async fn confirm_delete(&mut self, now: Instant) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.backend.delete(id).await {
            Ok(()) => {
                self.set_feedback(FeedbackKind::Success, DELETED_FEEDBACK, now);
                self.refresh(now).await;
            }
            Err(err) => {
                warn!(error = %err, "Delete failed");
                match err {
                    ClientError::Rejected { message, .. } => {
                        self.set_feedback(FeedbackKind::Error, message, now);
                    }
                    ClientError::Transport(_) => {
                        self.set_feedback(FeedbackKind::Error, DELETE_ERROR_FEEDBACK, now);
                    }
                }
            }
        }
    }

    fn set_feedback(&mut self, kind: FeedbackKind, text: impl Into<String>, now: Instant) {
        self.feedback = Some(Feedback {
            kind,
            text: text.into(),
            expires_at: now + FEEDBACK_LIFETIME,
        });
    }
}

/// Case-insensitive name ordering, ties broken by the raw name.
fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Turns the text form into typed fields. The name goes through as-is
/// (the server owns that check); numeric fields that do not parse produce
/// the matching field message without a request being made.
fn parse_form(form: &ProductForm) -> Result<ProductFields, &'static str> {
    let price = form
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or(INVALID_PRICE_FEEDBACK)?;
    let quantity = form
        .quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| INVALID_QUANTITY_FEEDBACK)?;
    Ok(ProductFields {
        name: form.name.clone(),
        price,
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{Call, MockCatalog, Reply};

    fn product(id: u64, name: &str, price: f64, quantity: u32) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn session_with_snapshot(products: Vec<Product>) -> CatalogSession<MockCatalog> {
        let mut session = CatalogSession::new(MockCatalog::new());
        session.products = products;
        session
    }

    #[tokio::test]
    async fn refresh_replaces_the_snapshot() {
        let backend = MockCatalog::new();
        backend.enqueue(Reply::Products(vec![product(1, "Caneta", 2.5, 10)]));
        let mut session = CatalogSession::new(backend);

        session.refresh(Instant::now()).await;

        assert_eq!(session.products().len(), 1);
        assert_eq!(session.backend().calls(), vec![Call::List(ListQuery::default())]);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_the_snapshot_and_reports() {
        let mut session = session_with_snapshot(vec![product(1, "Caneta", 2.5, 10)]);
        session
            .backend()
            .enqueue(Reply::Fail(ClientError::Transport("boom".to_string())));

        session.refresh(Instant::now()).await;

        assert_eq!(session.products().len(), 1);
        let feedback = session.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.text, "Erro ao carregar produtos.");
    }

    #[tokio::test]
    async fn submit_after_begin_create_sends_a_create() {
        let mut session = CatalogSession::new(MockCatalog::new());
        session.begin_create();
        let form = session.form_mut().unwrap();
        form.name = "Caneta".to_string();
        form.price = "2.5".to_string();
        form.quantity = "10".to_string();
        session
            .backend()
            .enqueue(Reply::Product(product(1, "Caneta", 2.5, 10)));
        session.backend().enqueue(Reply::Products(vec![product(
            1, "Caneta", 2.5, 10,
        )]));

        session.submit(Instant::now()).await;

        let calls = session.backend().calls();
        assert!(matches!(calls[0], Call::Create(_)));
        // Every successful mutation re-fetches the full list.
        assert!(matches!(calls[1], Call::List(_)));
        assert_eq!(session.editor(), &Editor::Idle);
        let feedback = session.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Success);
        assert_eq!(feedback.text, "Produto adicionado com sucesso!");
    }

    #[tokio::test]
    async fn submit_after_begin_edit_sends_an_update_for_that_id() {
        let mut session = session_with_snapshot(vec![product(3, "Caneta", 2.5, 10)]);
        assert!(session.begin_edit(3));
        // Pre-filled from the snapshot.
        assert_eq!(session.form_mut().unwrap().name, "Caneta");
        session.form_mut().unwrap().name = "Caneta Azul".to_string();
        session
            .backend()
            .enqueue(Reply::Product(product(3, "Caneta Azul", 2.5, 10)));
        session.backend().enqueue(Reply::Products(vec![product(
            3,
            "Caneta Azul",
            2.5,
            10,
        )]));

        session.submit(Instant::now()).await;

        match &session.backend().calls()[0] {
            Call::Update(id, fields) => {
                assert_eq!(*id, 3);
                assert_eq!(fields.name, "Caneta Azul");
            }
            other => panic!("expected update, got {other:?}"),
        }
        assert_eq!(
            session.feedback().unwrap().text,
            "Produto atualizado com sucesso!"
        );
    }

    #[tokio::test]
    async fn begin_edit_of_unknown_id_is_refused() {
        let mut session = session_with_snapshot(vec![]);
        assert!(!session.begin_edit(9));
        assert_eq!(session.editor(), &Editor::Idle);
    }

    #[tokio::test]
    async fn rejected_submit_reopens_the_editor_with_the_form_intact() {
        let mut session = CatalogSession::new(MockCatalog::new());
        session.begin_create();
        let form = session.form_mut().unwrap();
        form.name = "Caneta".to_string();
        form.price = "2.5".to_string();
        form.quantity = "10".to_string();
        session.backend().enqueue(Reply::Fail(ClientError::Rejected {
            status: 400,
            message: "Preço inválido".to_string(),
        }));

        session.submit(Instant::now()).await;

        match session.editor() {
            Editor::Editing { target, form } => {
                assert_eq!(*target, EditTarget::Create);
                assert_eq!(form.name, "Caneta");
            }
            other => panic!("expected editing, got {other:?}"),
        }
        assert_eq!(session.feedback().unwrap().text, "Preço inválido");
    }

    #[tokio::test]
    async fn unparsable_numeric_input_fails_locally_without_a_request() {
        let mut session = CatalogSession::new(MockCatalog::new());
        session.begin_create();
        let form = session.form_mut().unwrap();
        form.name = "Caneta".to_string();
        form.price = "abc".to_string();
        form.quantity = "10".to_string();

        session.submit(Instant::now()).await;

        assert!(session.backend().calls().is_empty());
        assert_eq!(session.feedback().unwrap().text, "Preço inválido");
        assert!(matches!(session.editor(), Editor::Editing { .. }));
    }

    #[tokio::test]
    async fn delete_requires_explicit_confirmation() {
        let mut session = session_with_snapshot(vec![product(1, "Caneta", 2.5, 10)]);

        session.request_delete(1);
        assert_eq!(session.pending_delete(), Some(1));
        // No call until confirmed.
        assert!(session.backend().calls().is_empty());

        session.backend().enqueue(Reply::Deleted);
        session.backend().enqueue(Reply::Products(vec![]));
        session.confirm_delete(Instant::now()).await;

        assert_eq!(
            session.backend().calls(),
            vec![Call::Delete(1), Call::List(ListQuery::default())]
        );
        assert_eq!(session.pending_delete(), None);
        assert_eq!(
            session.feedback().unwrap().text,
            "Produto excluído com sucesso!"
        );
    }

    #[tokio::test]
    async fn cancelled_delete_never_reaches_the_backend() {
        let mut session = session_with_snapshot(vec![product(1, "Caneta", 2.5, 10)]);

        session.request_delete(1);
        session.cancel_delete();
        session.confirm_delete(Instant::now()).await;

        assert!(session.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn starting_an_edit_clears_a_pending_delete() {
        let mut session = session_with_snapshot(vec![product(1, "Caneta", 2.5, 10)]);

        session.request_delete(1);
        session.begin_create();

        assert_eq!(session.pending_delete(), None);
    }

    #[test]
    fn feedback_expires_after_its_lifetime() {
        let mut session = session_with_snapshot(vec![]);
        let start = Instant::now();
        session.set_feedback(FeedbackKind::Success, "ok", start);

        session.tick(start + Duration::from_secs(1));
        assert!(session.feedback().is_some());

        session.tick(start + FEEDBACK_LIFETIME);
        assert!(session.feedback().is_none());
    }

    #[test]
    fn visible_products_filter_and_sort_locally() {
        let mut session = session_with_snapshot(vec![
            product(1, "Caneta", 2.5, 10),
            product(2, "Lápis", 1.0, 50),
            product(3, "caneta azul", 3.0, 4),
        ]);
        session.filter = "CANETA".to_string();
        session.sort = SortSpec {
            field: SortField::Price,
            direction: SortDirection::Descending,
        };

        let visible: Vec<u64> = session.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![3, 1]);
    }

    #[test]
    fn visible_products_sort_by_quantity_ascending() {
        let mut session = session_with_snapshot(vec![
            product(1, "Caneta", 2.5, 10),
            product(2, "Lápis", 1.0, 50),
            product(3, "Borracha", 0.5, 4),
        ]);
        session.sort = SortSpec {
            field: SortField::Quantity,
            direction: SortDirection::Ascending,
        };

        let visible: Vec<u32> = session
            .visible_products()
            .iter()
            .map(|p| p.quantity)
            .collect();
        assert_eq!(visible, vec![4, 10, 50]);
    }
}
