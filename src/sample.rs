use chrono::{Days, NaiveDate};

use crate::board::Board;
use crate::models::{Day, DayId, Priority, Subject, Task, TaskId};

/// Seed board shown at startup: monday..sunday starting at `week_start`.
pub fn sample_board(week_start: NaiveDate) -> Board {
    let mut days: Vec<Day> = DayId::WEEK
        .iter()
        .enumerate()
        .map(|(offset, id)| {
            let date = week_start
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(week_start);
            Day::new(*id, date)
        })
        .collect();

    days[0].tasks = vec![
        Task::new(TaskId::from("1"), "Resolver exercícios de álgebra", Subject::Math, 45)
            .with_priority(Priority::High)
            .with_description("Capítulo 3 - Equações de segundo grau"),
        Task::new(TaskId::from("2"), "Estudar células vegetais", Subject::Science, 30)
            .with_completed(true)
            .with_description("Fotossíntese e respiração celular"),
    ];
    days[1].tasks = vec![
        Task::new(TaskId::from("3"), "Redação sobre meio ambiente", Subject::Language, 60)
            .with_priority(Priority::High)
            .with_description("Texto dissertativo-argumentativo"),
    ];
    days[2].tasks = vec![
        Task::new(TaskId::from("4"), "Revolução Industrial", Subject::History, 40)
            .with_description("Primeira e segunda fases"),
    ];
    days[5].tasks = vec![
        Task::new(TaskId::from("5"), "Revisão geral de matemática", Subject::Math, 90)
            .with_priority(Priority::High)
            .with_description("Revisão dos tópicos da semana"),
    ];
    days[6].tasks = vec![
        Task::new(TaskId::from("6"), "Leitura complementar", Subject::Language, 60)
            .with_description("Livro de literatura brasileira"),
    ];

    Board::new(days)
}
