//! Fixed DDL for the eight warehouse tables.
//!
//! Identifiers are small integers, timings are reals, flags are 0/1
//! integers and free text is text. Creation is idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS races (
    race_id     SMALLINT,
    year        SMALLINT,
    round       SMALLINT,
    circuit_id  SMALLINT,
    name        TEXT,
    date        DATE
);

CREATE TABLE IF NOT EXISTS drivers (
    driver_id   SMALLINT,
    number      TINYINT,
    code        TEXT,
    name        TEXT,
    birth_date  DATE,
    nationality TEXT
);

CREATE TABLE IF NOT EXISTS constructors (
    constructor_id SMALLINT,
    name           TEXT,
    nationality    TEXT
);

CREATE TABLE IF NOT EXISTS results (
    year             SMALLINT,
    race_id          SMALLINT,
    driver_id        SMALLINT,
    constructor_id   SMALLINT,
    grid             TINYINT,
    position         TINYINT,
    classification   TINYINT,
    laps             TINYINT,
    pct_complete     REAL,
    not_on_grid      TINYINT,
    pitlane_start    TINYINT,
    points           REAL,
    status           TEXT,
    finished_running TINYINT
);

CREATE TABLE IF NOT EXISTS lap_times (
    race_id       SMALLINT,
    driver_id     SMALLINT,
    lap           TINYINT,
    race_laps     TINYINT,
    pct_complete  REAL,
    seconds       REAL,
    total_seconds REAL,
    position      TINYINT,
    stops         TINYINT,
    stint         TINYINT,
    is_inlap      TINYINT,
    is_outlap     TINYINT
);

CREATE TABLE IF NOT EXISTS lap_time_deltas (
    race_id            SMALLINT,
    lap                TINYINT,
    position_ahead     TINYINT,
    position_behind    TINYINT,
    driver_id_ahead    SMALLINT,
    driver_id_behind   SMALLINT,
    lap_time_delta     REAL,
    race_time_delta    REAL,
    is_lap_down_ahead  TINYINT,
    is_retired_ahead   TINYINT,
    is_lap_down_behind TINYINT,
    is_retired_behind  TINYINT
);

CREATE TABLE IF NOT EXISTS qualifying (
    race_id   SMALLINT,
    driver_id SMALLINT,
    position  TINYINT,
    q1        REAL,
    q2        REAL,
    q3        REAL,
    rank_q1   TINYINT,
    rank_q2   TINYINT,
    rank_q3   TINYINT
);

CREATE TABLE IF NOT EXISTS qualifying_summary (
    race_id        SMALLINT,
    q1_escape_time REAL,
    q2_escape_time REAL,
    pole_time      REAL,
    best_time      REAL,
    time_107       REAL
);
";
