pub mod analytics;
pub mod poems;
pub mod ratings;
pub mod records;
pub mod schema;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use analytics::*;
pub use poems::*;
pub use ratings::*;
pub use records::*;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when the database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Database unavailable")
    }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
    pool.lock().map_err(|_: PoisonError<_>| {
        tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
        DbLockError
    })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn seed_poems(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM poems", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    for poem in get_poem_seed_data() {
        insert_poem(conn, &poem)?;
    }
    Ok(())
}

fn get_poem_seed_data() -> Vec<crate::domain::Poem> {
    use crate::domain::Poem;

    vec![
        Poem::new(
            "静夜思",
            "李白",
            "唐",
            "床前明月光，疑是地上霜。举头望明月，低头思故乡。",
            Some("明亮的月光洒在床前，好像地上泛起了一层白霜。抬头望那天上的明月，低头不禁思念起远方的家乡。"),
            "easy",
            Some("思乡"),
        ),
        Poem::new(
            "春晓",
            "孟浩然",
            "唐",
            "春眠不觉晓，处处闻啼鸟。夜来风雨声，花落知多少。",
            Some("春日酣睡不知不觉天已亮，到处都能听到鸟儿的啼叫。昨夜风雨交加，不知吹落了多少花朵。"),
            "easy",
            Some("春天"),
        ),
        Poem::new(
            "登鹳雀楼",
            "王之涣",
            "唐",
            "白日依山尽，黄河入海流。欲穷千里目，更上一层楼。",
            Some("夕阳依傍着山峦渐渐落下，黄河朝着大海滔滔奔流。想要看尽千里风光，那就要登上更高的一层楼。"),
            "easy",
            Some("哲理"),
        ),
        Poem::new(
            "咏鹅",
            "骆宾王",
            "唐",
            "鹅鹅鹅，曲项向天歌。白毛浮绿水，红掌拨清波。",
            None,
            "easy",
            Some("咏物"),
        ),
        Poem::new(
            "悯农",
            "李绅",
            "唐",
            "锄禾日当午，汗滴禾下土。谁知盘中餐，粒粒皆辛苦。",
            None,
            "easy",
            Some("劝学"),
        ),
        Poem::new(
            "绝句",
            "杜甫",
            "唐",
            "两个黄鹂鸣翠柳，一行白鹭上青天。窗含西岭千秋雪，门泊东吴万里船。",
            Some("两只黄鹂在翠绿的柳树间鸣叫，一行白鹭直冲向蔚蓝的天空。凭窗望去西岭千年积雪，门外停泊着万里东行的船只。"),
            "medium",
            Some("写景"),
        ),
    ]
}

#[cfg(test)]
pub(crate) fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}
