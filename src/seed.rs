// src/seed.rs

//! One-off bootstrap data: two default accounts and a few sample questions.
//! Run by the `seed` binary, never by the server itself.

use sqlx::SqlitePool;

use crate::{error::AppError, models::user::Role, utils::hash::hash_password};

struct SeedUser {
    username: &'static str,
    password: &'static str,
    full_name: &'static str,
    role: Role,
}

struct SeedQuestion {
    text: &'static str,
    correct: &'static str,
    answers: [(&'static str, &'static str); 4],
}

const USERS: [SeedUser; 2] = [
    SeedUser {
        username: "admin",
        password: "admin123",
        full_name: "Administrator",
        role: Role::Admin,
    },
    SeedUser {
        username: "user",
        password: "user123",
        full_name: "Test User",
        role: Role::User,
    },
];

const QUESTIONS: [SeedQuestion; 3] = [
    SeedQuestion {
        text: "Thủ đô của Việt Nam là gì?",
        correct: "A",
        answers: [("A", "Hà Nội"), ("B", "TP.HCM"), ("C", "Đà Nẵng"), ("D", "Cần Thơ")],
    },
    SeedQuestion {
        text: "2 + 2 = ?",
        correct: "B",
        answers: [("A", "3"), ("B", "4"), ("C", "5"), ("D", "6")],
    },
    SeedQuestion {
        text: "Màu của lá cây là gì?",
        correct: "C",
        answers: [("A", "Đỏ"), ("B", "Xanh dương"), ("C", "Xanh lá"), ("D", "Vàng")],
    },
];

/// What a seeding run actually inserted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub questions_created: usize,
}

/// Inserts missing default accounts, then sample questions if the bank is empty.
/// Safe to run repeatedly.
pub async fn run(pool: &SqlitePool) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    for user in &USERS {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
            .bind(user.username)
            .fetch_one(pool)
            .await?;
        if exists {
            continue;
        }

        let hashed_password = hash_password(user.password)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, full_name, role)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(user.username)
        .bind(hashed_password)
        .bind(user.full_name)
        .bind(user.role.as_str())
        .execute(pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            tracing::info!(username = user.username, role = %user.role, "Seeded account");
            report.users_created += 1;
        }
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Question bank not empty, skipping sample questions");
        return Ok(report);
    }

    let admin_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(USERS[0].username)
        .fetch_one(pool)
        .await?;

    let mut tx = pool.begin().await?;
    for question in &QUESTIONS {
        let question_id: i64 = sqlx::query_scalar(
            "INSERT INTO questions (question_text, correct_answer, created_by) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(question.text)
        .bind(question.correct)
        .bind(admin_id)
        .fetch_one(&mut *tx)
        .await?;

        for (label, text) in question.answers {
            sqlx::query("INSERT INTO answers (question_id, label, answer_text) VALUES (?, ?, ?)")
                .bind(question_id)
                .bind(label)
                .bind(text)
                .execute(&mut *tx)
                .await?;
        }
        report.questions_created += 1;
    }
    tx.commit().await?;

    tracing::info!(count = report.questions_created, "Seeded sample questions");
    Ok(report)
}
