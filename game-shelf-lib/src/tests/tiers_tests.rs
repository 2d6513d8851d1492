use super::*;
use crate::storage::MemoryStore;

fn game(id: u64) -> Game {
    Game::new(id, format!("Game {id}")).with_image(format!("{id}.jpg"))
}

fn collection() -> Vec<Game> {
    (1..=6).map(game).collect()
}

fn tier(id: &str) -> TierId {
    TierId::new(id)
}

fn board_with(store: &Arc<MemoryStore>, games: &[Game]) -> TierBoard {
    TierBoard::load(store.clone(), games)
}

fn ids(games: &[Game]) -> Vec<u64> {
    games.iter().map(|g| g.id.0).collect()
}

/// Union of tiers and pool must equal the board set with no duplicates.
fn assert_partition(board: &TierBoard) {
    let mut all: Vec<GameId> = board.tiers().iter().flat_map(Tier::game_ids).collect();
    all.extend(board.unassigned().iter().map(|g| g.id));
    let unique: HashSet<GameId> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len(), "a game appears twice: {all:?}");
    let expected: HashSet<GameId> = board.games().iter().map(|g| g.id).collect();
    assert_eq!(unique, expected);
}

#[test]
fn fresh_board_has_default_tiers_and_full_pool() {
    let store = Arc::new(MemoryStore::new());
    let board = board_with(&store, &collection());
    assert_eq!(board.tiers().len(), 6);
    assert_eq!(board.unassigned().len(), 6);
    assert_partition(&board);
}

#[test]
fn ineligible_games_never_enter_the_board() {
    let store = Arc::new(MemoryStore::new());
    let games = vec![game(1), Game::new(2, "No cover"), Game::new(0, "No id").with_image("x.jpg")];
    let mut board = board_with(&store, &games);
    assert_eq!(ids(board.games()), vec![1]);

    assert_eq!(board.move_game(GameId(2), None, Some(&tier("S"))), None);
    assert!(board.tier(&tier("S")).unwrap().is_empty());
}

#[test]
fn move_from_pool_then_back_restores_pool() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());

    assert_eq!(
        board.move_game(GameId(3), None, Some(&tier("S"))),
        Some(tier("S"))
    );
    assert!(board.tier(&tier("S")).unwrap().contains(GameId(3)));
    assert!(board.unassigned().iter().all(|g| g.id != GameId(3)));

    assert_eq!(board.move_game(GameId(3), Some(&tier("S")), None), None);
    assert!(board.tier(&tier("S")).unwrap().is_empty());
    assert!(board.unassigned().iter().any(|g| g.id == GameId(3)));
    assert_partition(&board);
}

#[test]
fn move_appends_to_end_of_target() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(1), None, Some(&tier("A")));
    board.move_game(GameId(2), None, Some(&tier("A")));
    board.move_game(GameId(3), None, Some(&tier("B")));
    board.move_game(GameId(3), Some(&tier("B")), Some(&tier("A")));
    assert_eq!(ids(&board.tier(&tier("A")).unwrap().games), vec![1, 2, 3]);
    assert!(board.tier(&tier("B")).unwrap().is_empty());
}

#[test]
fn move_from_tier_not_holding_the_game_adds_it_once() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(1), None, Some(&tier("B")));

    board.move_game(GameId(5), Some(&tier("B")), Some(&tier("A")));
    assert_eq!(ids(&board.tier(&tier("B")).unwrap().games), vec![1]);
    assert_eq!(ids(&board.tier(&tier("A")).unwrap().games), vec![5]);

    // Repeating the drop never duplicates the entry
    board.move_game(GameId(5), Some(&tier("B")), Some(&tier("A")));
    assert_eq!(ids(&board.tier(&tier("A")).unwrap().games), vec![5]);
    assert_partition(&board);
}

#[test]
fn stale_source_still_keeps_game_in_one_tier() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(4), None, Some(&tier("C")));
    // Claimed to come from the pool, but it is actually in C
    board.move_game(GameId(4), None, Some(&tier("D")));
    assert!(board.tier(&tier("C")).unwrap().is_empty());
    assert_eq!(board.tier_of(GameId(4)), Some(&tier("D")));
    assert_partition(&board);
}

#[test]
fn unknown_target_only_removes_from_source() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(2), None, Some(&tier("S")));
    assert_eq!(board.move_game(GameId(2), Some(&tier("S")), Some(&tier("Z"))), None);
    assert!(board.tier(&tier("S")).unwrap().is_empty());
    assert_partition(&board);
}

#[test]
fn reset_empties_tiers_and_refills_pool() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(1), None, Some(&tier("S")));
    board.move_game(GameId(2), None, Some(&tier("E")));
    board.reset();
    assert!(board.tiers().iter().all(Tier::is_empty));
    assert_eq!(board.unassigned().len(), 6);
    assert_partition(&board);
}

#[test]
fn partition_holds_over_a_move_sequence() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    let ranks = ["S", "A", "B", "C", "D", "E", "Z"];
    for step in 0..60u64 {
        let id = GameId(step % 7 + 1);
        let source = (step % 3 != 0).then(|| tier(ranks[(step as usize * 5) % ranks.len()]));
        let target = (step % 4 != 0).then(|| tier(ranks[(step as usize * 3) % ranks.len()]));
        board.move_game(id, source.as_ref(), target.as_ref());
        assert_partition(&board);
        if step == 40 {
            board.reset();
            assert_partition(&board);
        }
    }
}

#[test]
fn assignments_survive_reload() {
    let store = Arc::new(MemoryStore::new());
    let games = collection();
    let mut board = board_with(&store, &games);
    board.move_game(GameId(1), None, Some(&tier("S")));
    board.move_game(GameId(2), None, Some(&tier("S")));
    board.move_game(GameId(6), None, Some(&tier("D")));

    let reloaded = board_with(&store, &games);
    assert_eq!(reloaded.tiers(), board.tiers());
    assert_eq!(ids(&reloaded.tier(&tier("S")).unwrap().games), vec![1, 2]);
    assert_eq!(reloaded.unassigned().len(), 3);
}

#[test]
fn reload_drops_unfollowed_and_refreshes_game_data() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(1), None, Some(&tier("S")));
    board.move_game(GameId(2), None, Some(&tier("A")));

    let mut games = collection();
    games.retain(|g| g.id != GameId(2));
    games[0].completed = true;
    let reloaded = board_with(&store, &games);

    let s = reloaded.tier(&tier("S")).unwrap();
    assert!(s.games[0].completed);
    assert!(reloaded.tier(&tier("A")).unwrap().is_empty());
    assert_partition(&reloaded);
}

#[test]
fn saved_duplicates_are_collapsed_on_load() {
    let state = r##"{
        "savedTiers": [
            {"id":"S","label":"S","color":"#ff7f7f",
             "images":[{"id":1,"image":"1.jpg"},{"id":1,"image":"1.jpg"}]},
            {"id":"A","label":"A","color":"#ffbf7f",
             "images":[{"id":1,"image":"1.jpg"},{"id":42,"image":"42.jpg"}]},
            {"id":"S","label":"S again","color":"#000000","images":[{"id":2,"image":"2.jpg"}]}
        ],
        "savedGames": [{"id":3,"image":"3.jpg"}]
    }"##;
    let store = Arc::new(MemoryStore::new().with_value(TIER_STATE_KEY, state));
    let board = board_with(&store, &collection());

    assert_eq!(board.tiers().len(), 2);
    assert_eq!(ids(&board.tier(&tier("S")).unwrap().games), vec![1]);
    assert!(board.tier(&tier("A")).unwrap().is_empty());
    assert_eq!(board.unassigned().len(), 5);
    assert_partition(&board);
}

#[test]
fn malformed_state_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new().with_value(TIER_STATE_KEY, "{\"savedTiers\": 7}"));
    let board = board_with(&store, &collection());
    assert_eq!(board.tiers(), default_tiers().as_slice());
}

#[test]
fn sync_collection_adds_new_games_to_pool() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection()[..2]);
    board.move_game(GameId(1), None, Some(&tier("S")));

    board.sync_collection(&collection());
    assert_eq!(board.unassigned().len(), 5);
    assert_eq!(board.tier_of(GameId(1)), Some(&tier("S")));
}

#[test]
fn persisted_record_carries_pool_and_version() {
    let store = Arc::new(MemoryStore::new());
    let mut board = board_with(&store, &collection());
    board.move_game(GameId(1), None, Some(&tier("S")));

    let saved: serde_json::Value =
        serde_json::from_str(&store.get(TIER_STATE_KEY).unwrap()).unwrap();
    assert_eq!(saved["version"], SCHEMA_VERSION);
    assert_eq!(saved["savedTiers"][0]["games"][0]["id"], 1);
    assert_eq!(saved["savedGames"].as_array().unwrap().len(), 5);
}
