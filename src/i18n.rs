//! User-facing labels in the supported locales.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{DayId, Priority, Subject};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt-br" | "pt" => Ok(Locale::PtBr),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Transient confirmation shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: message.into(),
        }
    }

    pub fn text(&self) -> String {
        if self.title.is_empty() {
            self.description.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    StatusUpdated,
    TaskCreated,
    TaskUpdated,
    TaskMoved,
}

impl Locale {
    pub fn subject(&self, subject: Subject) -> &'static str {
        match (self, subject) {
            (Locale::En, Subject::Math) => "Math",
            (Locale::En, Subject::Science) => "Science",
            (Locale::En, Subject::Language) => "Language",
            (Locale::En, Subject::History) => "History",
            (Locale::PtBr, Subject::Math) => "Matemática",
            (Locale::PtBr, Subject::Science) => "Ciências",
            (Locale::PtBr, Subject::Language) => "Linguagem",
            (Locale::PtBr, Subject::History) => "História",
        }
    }

    pub fn priority(&self, priority: Priority) -> &'static str {
        match (self, priority) {
            (Locale::En, Priority::Low) => "Low",
            (Locale::En, Priority::Medium) => "Medium",
            (Locale::En, Priority::High) => "High",
            (Locale::PtBr, Priority::Low) => "Baixa",
            (Locale::PtBr, Priority::Medium) => "Média",
            (Locale::PtBr, Priority::High) => "Alta",
        }
    }

    pub fn day_name(&self, day: DayId) -> &'static str {
        match (self, day.weekday()) {
            (Locale::En, Weekday::Mon) => "Monday",
            (Locale::En, Weekday::Tue) => "Tuesday",
            (Locale::En, Weekday::Wed) => "Wednesday",
            (Locale::En, Weekday::Thu) => "Thursday",
            (Locale::En, Weekday::Fri) => "Friday",
            (Locale::En, Weekday::Sat) => "Saturday",
            (Locale::En, Weekday::Sun) => "Sunday",
            (Locale::PtBr, Weekday::Mon) => "Segunda",
            (Locale::PtBr, Weekday::Tue) => "Terça",
            (Locale::PtBr, Weekday::Wed) => "Quarta",
            (Locale::PtBr, Weekday::Thu) => "Quinta",
            (Locale::PtBr, Weekday::Fri) => "Sexta",
            (Locale::PtBr, Weekday::Sat) => "Sábado",
            (Locale::PtBr, Weekday::Sun) => "Domingo",
        }
    }

    /// Short "day month" label for a column header
    pub fn short_date(&self, date: NaiveDate) -> String {
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        const PT: [&str; 12] = [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ];
        let month = date.month0() as usize;
        match self {
            Locale::En => format!("{} {}", EN[month], date.day()),
            Locale::PtBr => format!("{} de {}", date.day(), PT[month]),
        }
    }

    pub fn notice(&self, kind: NoticeKind) -> Notice {
        let (title, description) = match (self, kind) {
            (Locale::En, NoticeKind::StatusUpdated) => {
                ("Status updated!", "Task progress was saved.")
            }
            (Locale::En, NoticeKind::TaskCreated) => {
                ("Task created!", "New task added to the schedule.")
            }
            (Locale::En, NoticeKind::TaskUpdated) => {
                ("Task updated!", "Your changes were saved.")
            }
            (Locale::En, NoticeKind::TaskMoved) => {
                ("Task moved!", "The task was transferred to the new day.")
            }
            (Locale::PtBr, NoticeKind::StatusUpdated) => {
                ("Status atualizado!", "O progresso da tarefa foi salvo.")
            }
            (Locale::PtBr, NoticeKind::TaskCreated) => {
                ("Tarefa criada!", "Nova tarefa adicionada ao cronograma.")
            }
            (Locale::PtBr, NoticeKind::TaskUpdated) => {
                ("Tarefa atualizada!", "As alterações foram salvas com sucesso.")
            }
            (Locale::PtBr, NoticeKind::TaskMoved) => {
                ("Tarefa movida com sucesso!", "A tarefa foi transferida para o novo dia.")
            }
        };
        Notice::new(title, description)
    }

    pub fn text(&self, key: Text) -> &'static str {
        match self {
            Locale::En => match key {
                Text::AppTitle => "Study Schedule",
                Text::Progress => "Progress",
                Text::TotalTime => "Total Time",
                Text::Subjects => "Subjects",
                Text::Today => "Today",
                Text::Week => "Week",
                Text::WholeWeek => "Whole week",
                Text::NoTasks => "No tasks",
                Text::Done => "done",
                Text::AddTask => "+ Add task",
                Text::Weekdays => "Weekdays",
                Text::Weekend => "Weekend",
                Text::NewTask => "New Study Task",
                Text::EditTask => "Edit Task",
                Text::Title => "Task title",
                Text::Subject => "Subject",
                Text::Duration => "Duration (min)",
                Text::Priority => "Priority",
                Text::Description => "Description (optional)",
                Text::Dragging => "Dragging",
            },
            Locale::PtBr => match key {
                Text::AppTitle => "Cronograma de Estudos",
                Text::Progress => "Progresso",
                Text::TotalTime => "Tempo Total",
                Text::Subjects => "Matérias",
                Text::Today => "Hoje",
                Text::Week => "Semana",
                Text::WholeWeek => "Semana completa",
                Text::NoTasks => "Nenhuma tarefa",
                Text::Done => "concluídas",
                Text::AddTask => "+ Adicionar tarefa",
                Text::Weekdays => "Dias úteis",
                Text::Weekend => "Fim de semana",
                Text::NewTask => "Nova Tarefa de Estudo",
                Text::EditTask => "Editar Tarefa",
                Text::Title => "Título da Tarefa",
                Text::Subject => "Matéria",
                Text::Duration => "Duração (min)",
                Text::Priority => "Prioridade",
                Text::Description => "Descrição (opcional)",
                Text::Dragging => "Arrastando",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    AppTitle,
    Progress,
    TotalTime,
    Subjects,
    Today,
    Week,
    WholeWeek,
    NoTasks,
    Done,
    AddTask,
    Weekdays,
    Weekend,
    NewTask,
    EditTask,
    Title,
    Subject,
    Duration,
    Priority,
    Description,
    Dragging,
}
