//! Sync Coordinator
//!
//! Turns user intents into board mutations plus remote calls.
//!
//! Creates go to the service first and are inserted with the id it assigns.
//! Deletes and renames are applied locally first. A delete leaves a
//! compensation in the pending log that is applied if the remote call fails;
//! renames are settled per card by the title ledger, in op order.
//! Drag moves are local only. Completions can arrive in any order, so every
//! handler re-checks the board before touching it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::try_join_all;

use crate::board::{Board, Compensation, DropResult, OpId, PendingLog, TitleLedger};
use crate::commands::BoardService;
use crate::error::{BoardError, RemoteError, SyncError, SyncResult};
use crate::models::{BoardList, Card, CardId, FileUpload};

/// Where the coordinator keeps the board. Each `update_board` is one atomic
/// change as far as observers are concerned.
pub trait BoardState {
    fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R;
    fn update_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R;
}

impl BoardState for Rc<RefCell<Board>> {
    fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.borrow())
    }

    fn update_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Result of a create or edit: the card is saved, the upload may not be
#[derive(Debug, Clone, PartialEq)]
pub struct CardSaved {
    pub card_id: CardId,
    pub upload_error: Option<SyncError>,
}

pub struct SyncCoordinator<S, B> {
    service: S,
    board: B,
    user_id: Option<String>,
    pending: RefCell<PendingLog>,
    titles: RefCell<TitleLedger>,
}

impl<S: BoardService, B: BoardState> SyncCoordinator<S, B> {
    pub fn new(service: S, board: B, user_id: Option<String>) -> Self {
        Self {
            service,
            board,
            user_id,
            pending: RefCell::new(PendingLog::new()),
            titles: RefCell::new(TitleLedger::new()),
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Optimistic mutations still waiting for the service
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len() + self.titles.borrow().len()
    }

    fn require_user(&self) -> SyncResult<&str> {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SyncError::Validation("No signed-in user".to_string()))
    }

    /// Fetch the user's lists and all their cards, then replace the board
    pub async fn load(&self) -> SyncResult<()> {
        let user_id = self.require_user()?;
        let lists = self.service.fetch_lists(user_id).await?;
        let fetched = try_join_all(lists.iter().map(|list| async move {
            let cards = self.service.fetch_cards(&list.id).await?;
            Ok::<_, RemoteError>((list.id.clone(), cards))
        }))
        .await?;

        let cards_by_list: HashMap<_, _> = fetched.into_iter().collect();
        log::info!("[SYNC] loaded {} lists, {} cards", lists.len(), cards_by_list.values().map(Vec::len).sum::<usize>());
        self.board.update_board(|b| b.load_board(lists, cards_by_list));
        Ok(())
    }

    pub async fn create_list(&self, name: &str) -> SyncResult<BoardList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SyncError::Validation("List name is required".to_string()));
        }
        let user_id = self.require_user()?;

        let list = self.service.create_list(name, user_id).await.map_err(|e| {
            log::error!("[SYNC] create list failed: {}", e);
            e
        })?;
        self.board.update_board(|b| b.insert_list(list.clone()))?;
        log::info!("[SYNC] list {} created", list.id);
        Ok(list)
    }

    pub async fn delete_list(&self, list_id: &str) -> SyncResult<()> {
        let removed = self.board.update_board(|b| b.remove_list(list_id))?;
        let op = self.pending.borrow_mut().record(Compensation::RestoreList(removed));

        match self.service.delete_list(list_id).await {
            Ok(()) => {
                self.pending.borrow_mut().confirm(op);
                log::info!("[SYNC] list {} deleted", list_id);
                Ok(())
            }
            Err(e) => {
                log::error!("[SYNC] delete list {} failed: {}", list_id, e);
                self.roll_back(op);
                Err(e.into())
            }
        }
    }

    /// Create remotely, insert at the end of the list, then upload files
    pub async fn create_card(&self, list_id: Option<&str>, title: &str, files: Vec<FileUpload>) -> SyncResult<CardSaved> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SyncError::Validation("Card title is required".to_string()));
        }
        let list_id = list_id.ok_or_else(|| SyncError::Validation("No list selected".to_string()))?;
        if !self.board.with_board(|b| b.contains_list(list_id)) {
            return Err(BoardError::UnknownList(list_id.to_string()).into());
        }

        let card = self.service.create_card(title, list_id).await.map_err(|e| {
            log::error!("[SYNC] create card in {} failed: {}", list_id, e);
            e
        })?;
        let card_id = card.id.clone();
        self.board.update_board(|b| b.insert_card(list_id, card, None))?;
        log::info!("[SYNC] card {} created in {}", card_id, list_id);

        let upload_error = self.upload(&card_id, &files).await.err();
        Ok(CardSaved { card_id, upload_error })
    }

    pub async fn delete_card(&self, list_id: &str, card_id: &str) -> SyncResult<()> {
        let removed = self.board.update_board(|b| b.remove_card(list_id, card_id))?;
        let op = self.pending.borrow_mut().record(Compensation::RestoreCard(removed));

        match self.service.delete_card(card_id).await {
            Ok(()) => {
                self.pending.borrow_mut().confirm(op);
                log::info!("[SYNC] card {} deleted", card_id);
                Ok(())
            }
            Err(e) => {
                log::error!("[SYNC] delete card {} failed: {}", card_id, e);
                self.roll_back(op);
                Err(e.into())
            }
        }
    }

    /// Rename in place, then upload any files picked in the edit form
    pub async fn rename_card(&self, card_id: &str, title: &str, files: Vec<FileUpload>) -> SyncResult<CardSaved> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SyncError::Validation("Card title is required".to_string()));
        }
        let previous = self
            .board
            .with_board(|b| b.card(card_id).map(|c| c.title.clone()))
            .ok_or_else(|| BoardError::NotFound(card_id.to_string()))?;

        self.board.update_board(|b| b.update_card_title(card_id, title))?;
        let op = self.pending.borrow_mut().next_op();
        self.titles.borrow_mut().begin(card_id, op, &previous, title);

        match self.service.rename_card(card_id, title).await {
            Ok(confirmed) => {
                let shown = self.titles.borrow_mut().succeed(card_id, op, confirmed.title);
                self.show_title(card_id, shown);
            }
            Err(e) => {
                log::error!("[SYNC] rename card {} failed: {}", card_id, e);
                let shown = self.titles.borrow_mut().fail(card_id, op);
                self.show_title(card_id, shown);
                return Err(e.into());
            }
        }

        let upload_error = self.upload(card_id, &files).await.err();
        Ok(CardSaved { card_id: card_id.to_string(), upload_error })
    }

    /// Apply a drop locally. Returns false for a cancelled drop.
    pub fn move_card(&self, drop: &DropResult) -> SyncResult<bool> {
        let moved = self.board.update_board(|b| b.apply_drop(drop))?;
        if let (true, Some(to)) = (moved, &drop.destination) {
            log::debug!(
                "[SYNC] moved {} {}[{}] -> {}[{}]",
                drop.card_id, drop.source.list_id, drop.source.index, to.list_id, to.index
            );
        }
        Ok(moved)
    }

    /// Fetch card details and refresh its attachments.
    /// `None` if the card left the board while the request was in flight.
    pub async fn open_card(&self, card_id: &str) -> SyncResult<Option<Card>> {
        let detail = self.service.fetch_card(card_id).await?;
        let refreshed = self.board.update_board(|b| {
            b.update_card_attachments(card_id, detail.attachments)
                .map(|_| b.card(card_id).cloned())
        });
        match refreshed {
            Ok(card) => Ok(card),
            Err(_) => {
                log::debug!("[SYNC] details for removed card {} ignored", card_id);
                Ok(None)
            }
        }
    }

    /// Upload files for a card that is already saved; never undoes the save
    async fn upload(&self, card_id: &str, files: &[FileUpload]) -> SyncResult<()> {
        if files.is_empty() {
            return Ok(());
        }
        if !self.board.with_board(|b| b.contains_card(card_id)) {
            log::debug!("[SYNC] skipping upload for removed card {}", card_id);
            return Ok(());
        }

        let updated = self.service.upload_files(card_id, files).await.map_err(|e| {
            log::error!("[SYNC] upload for card {} failed: {}", card_id, e);
            SyncError::AttachmentUpload(e)
        })?;
        if self.board.update_board(|b| b.update_card_attachments(card_id, updated.attachments)).is_err() {
            log::debug!("[SYNC] upload finished for removed card {}", card_id);
        }
        Ok(())
    }

    /// Put the ledger's settled title on the card, if it is still there
    fn show_title(&self, card_id: &str, title: Option<String>) {
        let Some(title) = title else { return };
        let result = self.board.update_board(|b| match b.card(card_id) {
            Some(card) if card.title == title => Ok(()),
            Some(_) => b.update_card_title(card_id, title),
            None => Err(BoardError::NotFound(card_id.to_string())),
        });
        if let Err(e) = result {
            log::debug!("[SYNC] stale rename response ignored: {}", e);
        }
    }

    fn roll_back(&self, op: OpId) {
        let Some(compensation) = self.pending.borrow_mut().take(op) else {
            return;
        };
        match self.board.update_board(|b| compensation.apply(b)) {
            Ok(()) => log::info!("[SYNC] rolled back op {}", op),
            Err(e) => log::warn!("[SYNC] rollback of op {} skipped: {}", op, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::{HashSet, VecDeque};

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    use crate::board::tests::{board_with, ids, make_card, make_list};
    use crate::board::DragLocation;
    use crate::models::{Attachment, AttachmentKind};

    #[derive(Default)]
    struct MockService {
        next_id: Cell<u32>,
        failing: RefCell<HashSet<&'static str>>,
        calls: RefCell<Vec<&'static str>>,
        /// One gate per rename call, in call order; `false` rejects that call
        rename_gates: RefCell<VecDeque<oneshot::Receiver<bool>>>,
        stored_titles: RefCell<HashMap<String, String>>,
        lists: Vec<BoardList>,
        cards: HashMap<String, Vec<Card>>,
    }

    impl MockService {
        fn fail(&self, op: &'static str) {
            self.failing.borrow_mut().insert(op);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        fn check(&self, op: &'static str) -> Result<(), RemoteError> {
            self.calls.borrow_mut().push(op);
            if self.failing.borrow().contains(op) {
                Err(RemoteError::Status { endpoint: op.to_string(), status: 500 })
            } else {
                Ok(())
            }
        }

        fn gate_rename(&self) -> oneshot::Sender<bool> {
            let (release, gate) = oneshot::channel();
            self.rename_gates.borrow_mut().push_back(gate);
            release
        }

        fn stored_title(&self, card_id: &str) -> Option<String> {
            self.stored_titles.borrow().get(card_id).cloned()
        }

        fn new_id(&self, prefix: &str) -> String {
            self.next_id.set(self.next_id.get() + 1);
            format!("{}{}", prefix, self.next_id.get())
        }
    }

    fn pdf(name: &str) -> Attachment {
        Attachment { url: format!("/uploads/{}", name), filename: name.to_string(), kind: AttachmentKind::Pdf }
    }

    #[async_trait(?Send)]
    impl BoardService for MockService {
        async fn fetch_lists(&self, _user_id: &str) -> Result<Vec<BoardList>, RemoteError> {
            self.check("fetch_lists")?;
            Ok(self.lists.clone())
        }

        async fn fetch_cards(&self, list_id: &str) -> Result<Vec<Card>, RemoteError> {
            self.check("fetch_cards")?;
            Ok(self.cards.get(list_id).cloned().unwrap_or_default())
        }

        async fn create_list(&self, name: &str, user_id: &str) -> Result<BoardList, RemoteError> {
            self.check("create_list")?;
            Ok(BoardList { id: self.new_id("l"), name: name.to_string(), owner_id: user_id.to_string() })
        }

        async fn delete_list(&self, _list_id: &str) -> Result<(), RemoteError> {
            self.check("delete_list")
        }

        async fn create_card(&self, title: &str, _list_id: &str) -> Result<Card, RemoteError> {
            self.check("create_card")?;
            let mut card = make_card(&self.new_id("n"));
            card.title = title.to_string();
            Ok(card)
        }

        async fn fetch_card(&self, card_id: &str) -> Result<Card, RemoteError> {
            self.check("fetch_card")?;
            let mut card = make_card(card_id);
            card.attachments = vec![pdf("syllabus.pdf")];
            Ok(card)
        }

        async fn rename_card(&self, card_id: &str, title: &str) -> Result<Card, RemoteError> {
            let gate = self.rename_gates.borrow_mut().pop_front();
            let accepted = match gate {
                Some(gate) => gate.await.unwrap_or(true),
                None => true,
            };
            self.check("rename_card")?;
            if !accepted {
                return Err(RemoteError::Status { endpoint: "rename_card".to_string(), status: 409 });
            }
            self.stored_titles.borrow_mut().insert(card_id.to_string(), title.to_string());
            let mut card = make_card(card_id);
            card.title = title.to_string();
            Ok(card)
        }

        async fn delete_card(&self, _card_id: &str) -> Result<(), RemoteError> {
            self.check("delete_card")
        }

        async fn upload_files(&self, card_id: &str, files: &[FileUpload]) -> Result<Card, RemoteError> {
            self.check("upload_files")?;
            let mut card = make_card(card_id);
            card.attachments = files.iter().map(|f| pdf(&f.filename)).collect();
            Ok(card)
        }
    }

    type TestCoordinator = SyncCoordinator<MockService, Rc<RefCell<Board>>>;

    fn setup(cards: &[&str]) -> (Rc<TestCoordinator>, Rc<RefCell<Board>>) {
        setup_with(MockService::default(), cards)
    }

    fn setup_with(service: MockService, cards: &[&str]) -> (Rc<TestCoordinator>, Rc<RefCell<Board>>) {
        let board = Rc::new(RefCell::new(board_with(cards)));
        let coordinator = SyncCoordinator::new(service, board.clone(), Some("u1".to_string()));
        (Rc::new(coordinator), board)
    }

    fn upload(name: &str) -> FileUpload {
        FileUpload { filename: name.to_string(), mime: "application/pdf".to_string(), bytes: vec![1, 2, 3] }
    }

    #[test]
    fn test_load_replaces_board() {
        let mut service = MockService::default();
        service.lists = vec![make_list("L1"), make_list("L2")];
        service.cards.insert("L1".into(), vec![make_card("x1"), make_card("x2")]);
        let (sync, board) = setup_with(service, &["c1"]);

        block_on(sync.load()).unwrap();

        let board = board.borrow();
        assert_eq!(board.lists().iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["L1", "L2"]);
        assert_eq!(ids(&board, "L1"), vec!["x1", "x2"]);
        assert!(board.cards("L2").is_empty());
        assert!(!board.contains_card("c1"));
    }

    #[test]
    fn test_load_failure_keeps_board() {
        let mut service = MockService::default();
        service.lists = vec![make_list("L1")];
        let (sync, board) = setup_with(service, &["c1"]);
        sync.service().fail("fetch_cards");
        let before = board.borrow().clone();

        assert!(matches!(block_on(sync.load()), Err(SyncError::Remote(_))));
        assert_eq!(*board.borrow(), before);
    }

    #[test]
    fn test_load_without_user_is_validation_error() {
        let board = Rc::new(RefCell::new(Board::new()));
        let sync = SyncCoordinator::new(MockService::default(), board, None);

        assert!(matches!(block_on(sync.load()), Err(SyncError::Validation(_))));
        assert!(sync.service().calls().is_empty());
    }

    #[test]
    fn test_create_list() {
        let (sync, board) = setup(&[]);

        assert!(matches!(block_on(sync.create_list("   ")), Err(SyncError::Validation(_))));
        assert!(sync.service().calls().is_empty());

        let list = block_on(sync.create_list("  Chemistry ")).unwrap();
        assert_eq!(list.name, "Chemistry");
        assert_eq!(board.borrow().lists().last(), Some(&list));
    }

    #[test]
    fn test_create_list_remote_failure_inserts_nothing() {
        let (sync, board) = setup(&[]);
        sync.service().fail("create_list");

        assert!(matches!(block_on(sync.create_list("Chemistry")), Err(SyncError::Remote(_))));
        assert_eq!(board.borrow().lists().len(), 2);
    }

    #[test]
    fn test_failed_card_creation_leaves_no_phantom() {
        let (sync, board) = setup(&["c1", "c2"]);
        sync.service().fail("create_card");
        let before = board.borrow().clone();

        let result = block_on(sync.create_card(Some("A"), "Math", Vec::new()));
        assert!(matches!(result, Err(SyncError::Remote(_))));
        assert_eq!(ids(&board.borrow(), "A"), vec!["c1", "c2"]);
        assert_eq!(*board.borrow(), before);
    }

    #[test]
    fn test_create_card_validation() {
        let (sync, _board) = setup(&[]);

        assert!(matches!(block_on(sync.create_card(Some("A"), "", Vec::new())), Err(SyncError::Validation(_))));
        assert!(matches!(block_on(sync.create_card(None, "Math", Vec::new())), Err(SyncError::Validation(_))));
        assert_eq!(
            block_on(sync.create_card(Some("Z"), "Math", Vec::new())),
            Err(SyncError::Board(BoardError::UnknownList("Z".into())))
        );
        assert!(sync.service().calls().is_empty());
    }

    #[test]
    fn test_create_card_appends_with_remote_id() {
        let (sync, board) = setup(&["c1"]);

        let saved = block_on(sync.create_card(Some("A"), "Math", vec![upload("notes.pdf")])).unwrap();
        assert_eq!(saved.upload_error, None);
        assert_eq!(ids(&board.borrow(), "A"), vec!["c1".to_string(), saved.card_id.clone()]);

        let board = board.borrow();
        let card = board.card(&saved.card_id).unwrap();
        assert_eq!(card.title, "Math");
        assert_eq!(card.attachments[0].filename, "notes.pdf");
    }

    #[test]
    fn test_upload_failure_keeps_created_card() {
        let (sync, board) = setup(&[]);
        sync.service().fail("upload_files");

        let saved = block_on(sync.create_card(Some("B"), "Math", vec![upload("a.png")])).unwrap();
        assert!(matches!(saved.upload_error, Some(SyncError::AttachmentUpload(_))));
        assert!(board.borrow().contains_card(&saved.card_id));
    }

    #[test]
    fn test_delete_card() {
        let (sync, board) = setup(&["c1", "c2"]);

        block_on(sync.delete_card("A", "c1")).unwrap();
        assert_eq!(ids(&board.borrow(), "A"), vec!["c2"]);
        assert_eq!(sync.pending_count(), 0);

        assert_eq!(
            block_on(sync.delete_card("A", "c1")),
            Err(SyncError::Board(BoardError::NotFound("c1".into())))
        );
    }

    #[test]
    fn test_failed_delete_card_rolls_back() {
        let (sync, board) = setup(&["c1", "c2", "c3"]);
        sync.service().fail("delete_card");

        assert!(matches!(block_on(sync.delete_card("A", "c2")), Err(SyncError::Remote(_))));
        assert_eq!(ids(&board.borrow(), "A"), vec!["c1", "c2", "c3"]);
        assert_eq!(sync.pending_count(), 0);
    }

    #[test]
    fn test_failed_delete_list_rolls_back() {
        let (sync, board) = setup(&["c1", "c2"]);
        sync.service().fail("delete_list");
        let before = board.borrow().clone();

        assert!(block_on(sync.delete_list("A")).is_err());
        assert_eq!(*board.borrow(), before);
    }

    #[test]
    fn test_delete_list_removes_cards() {
        let (sync, board) = setup(&["c1", "c2"]);

        block_on(sync.delete_list("A")).unwrap();
        assert!(!board.borrow().contains_list("A"));
        assert_eq!(board.borrow().card_count(), 0);
    }

    #[test]
    fn test_rename_card_with_upload() {
        let (sync, board) = setup(&["c1"]);

        let saved = block_on(sync.rename_card("c1", " Physics ", vec![upload("lab.pdf")])).unwrap();
        assert_eq!(saved.upload_error, None);

        let board = board.borrow();
        let card = board.card("c1").unwrap();
        assert_eq!(card.title, "Physics");
        assert_eq!(card.first_pdf().map(|a| a.filename.as_str()), Some("lab.pdf"));
    }

    #[test]
    fn test_failed_rename_rolls_back() {
        let (sync, board) = setup(&["c1"]);
        sync.service().fail("rename_card");

        assert!(block_on(sync.rename_card("c1", "Physics", Vec::new())).is_err());
        assert_eq!(board.borrow().card("c1").unwrap().title, "Card c1");
        assert_eq!(sync.pending_count(), 0);
    }

    #[test]
    fn test_rename_upload_failure_keeps_title() {
        let (sync, board) = setup(&["c1"]);
        sync.service().fail("upload_files");

        let saved = block_on(sync.rename_card("c1", "Physics", vec![upload("lab.pdf")])).unwrap();
        assert!(matches!(saved.upload_error, Some(SyncError::AttachmentUpload(_))));
        assert_eq!(board.borrow().card("c1").unwrap().title, "Physics");
    }

    fn run_rename_then_delete(fail_rename: bool) -> (Rc<RefCell<Board>>, Option<SyncResult<CardSaved>>) {
        let (sync, board) = setup(&["c1", "c2"]);
        if fail_rename {
            sync.service().fail("rename_card");
        }
        let release = sync.service().gate_rename();

        let mut pool = LocalPool::new();
        let outcome = Rc::new(RefCell::new(None));
        {
            let sync = sync.clone();
            let outcome = outcome.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = sync.rename_card("c1", "Renamed", vec![upload("late.pdf")]).await;
                    *outcome.borrow_mut() = Some(result);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(board.borrow().card("c1").unwrap().title, "Renamed");

        pool.run_until(sync.delete_card("A", "c1")).unwrap();
        release.send(true).unwrap();
        pool.run_until_stalled();

        assert_eq!(sync.pending_count(), 0);
        assert!(!sync.service().calls().contains(&"upload_files"));
        let result = outcome.borrow_mut().take();
        (board, result)
    }

    #[test]
    fn test_stale_rename_success_does_not_resurrect() {
        let (board, result) = run_rename_then_delete(false);
        assert!(!board.borrow().contains_card("c1"));
        assert_eq!(ids(&board.borrow(), "A"), vec!["c2"]);
        assert!(matches!(result, Some(Ok(_))));
    }

    #[test]
    fn test_stale_rename_failure_does_not_resurrect() {
        let (board, result) = run_rename_then_delete(true);
        assert!(!board.borrow().contains_card("c1"));
        assert!(matches!(result, Some(Err(SyncError::Remote(_)))));
    }

    fn spawn_rename(pool: &mut LocalPool, sync: &Rc<TestCoordinator>, title: &'static str) {
        let sync = sync.clone();
        pool.spawner()
            .spawn_local(async move {
                let _ = sync.rename_card("c1", title, Vec::new()).await;
            })
            .unwrap();
        pool.run_until_stalled();
    }

    #[test]
    fn test_repeated_title_with_late_failure_matches_service() {
        let (sync, board) = setup(&["c1"]);
        let first = sync.service().gate_rename();
        let second = sync.service().gate_rename();
        let third = sync.service().gate_rename();

        let mut pool = LocalPool::new();
        spawn_rename(&mut pool, &sync, "X");
        spawn_rename(&mut pool, &sync, "Y");
        spawn_rename(&mut pool, &sync, "X");
        assert_eq!(board.borrow().card("c1").unwrap().title, "X");
        assert_eq!(sync.pending_count(), 3);

        second.send(true).unwrap();
        pool.run_until_stalled();
        third.send(true).unwrap();
        pool.run_until_stalled();
        first.send(false).unwrap();
        pool.run_until_stalled();

        assert_eq!(sync.service().stored_title("c1").as_deref(), Some("X"));
        assert_eq!(board.borrow().card("c1").unwrap().title, "X");
        assert_eq!(sync.pending_count(), 0);
    }

    #[test]
    fn test_newest_rename_failure_shows_last_stored_title() {
        let (sync, board) = setup(&["c1"]);
        let first = sync.service().gate_rename();
        let second = sync.service().gate_rename();

        let mut pool = LocalPool::new();
        spawn_rename(&mut pool, &sync, "Algebra");
        spawn_rename(&mut pool, &sync, "Biology");

        second.send(false).unwrap();
        pool.run_until_stalled();
        assert_eq!(board.borrow().card("c1").unwrap().title, "Algebra");

        first.send(true).unwrap();
        pool.run_until_stalled();
        assert_eq!(sync.service().stored_title("c1").as_deref(), Some("Algebra"));
        assert_eq!(board.borrow().card("c1").unwrap().title, "Algebra");
        assert_eq!(sync.pending_count(), 0);
    }

    #[test]
    fn test_move_card_is_local_only() {
        let (sync, board) = setup(&["c1", "c2", "c3"]);

        let drop = DropResult {
            card_id: "c1".into(),
            source: DragLocation::new("A", 0),
            destination: Some(DragLocation::new("B", 0)),
        };
        assert_eq!(sync.move_card(&drop), Ok(true));
        assert_eq!(ids(&board.borrow(), "A"), vec!["c2", "c3"]);
        assert_eq!(ids(&board.borrow(), "B"), vec!["c1"]);

        let cancelled = DropResult { card_id: "c2".into(), source: DragLocation::new("A", 0), destination: None };
        assert_eq!(sync.move_card(&cancelled), Ok(false));
        assert!(sync.service().calls().is_empty());
        assert_eq!(sync.pending_count(), 0);
    }

    #[test]
    fn test_open_card_refreshes_attachments() {
        let (sync, board) = setup(&["c1"]);

        let card = block_on(sync.open_card("c1")).unwrap().unwrap();
        assert_eq!(card.first_pdf().map(|a| a.filename.as_str()), Some("syllabus.pdf"));
        assert_eq!(board.borrow().card("c1"), Some(&card));

        assert_eq!(block_on(sync.open_card("gone")), Ok(None));
        assert!(!board.borrow().contains_card("gone"));
    }
}
