//! 后台请求
//!
//! 每个请求单独起一个线程，结果通过 channel 交回 UI 线程。
//! 不做取消与去重，是否采用结果由 UI 按请求 ID 判断。

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError, channel};
use std::thread;
use std::time::Duration;

use tracing::{debug, error};
use uuid::Uuid;

use crate::client::TranslationService;
use crate::error::ClientError;
use crate::models::{AnalysisResult, TreeImage};

/// 待执行的请求
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Analyze { text: String },
    Tree { sentence: String },
}

/// 请求结果
#[derive(Debug)]
pub enum Outcome {
    Analysis(Result<AnalysisResult, ClientError>),
    Tree {
        sentence: String,
        result: Result<TreeImage, ClientError>,
    },
}

#[derive(Debug)]
pub struct WorkerEvent {
    pub id: Uuid,
    pub outcome: Outcome,
}

pub struct Worker {
    service: Arc<dyn TranslationService>,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
}

impl Worker {
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        let (tx, rx) = channel();
        Self { service, tx, rx }
    }

    /// 提交请求，立即返回请求 ID
    pub fn submit(&self, job: Job) -> Uuid {
        let id = Uuid::new_v4();
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        debug!(%id, ?job, "提交请求");

        thread::spawn(move || {
            let outcome = match job {
                Job::Analyze { text } => Outcome::Analysis(service.analyze(&text)),
                Job::Tree { sentence } => {
                    let result = service.syntax_tree(&sentence);
                    Outcome::Tree { sentence, result }
                }
            };
            if tx.send(WorkerEvent { id, outcome }).is_err() {
                error!(%id, "UI 已退出，丢弃请求结果");
            }
        });

        id
    }

    /// 非阻塞地取一个结果
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    #[allow(dead_code)]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeService;
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_submit_reports_result_with_same_id() {
        let worker = Worker::new(Arc::new(FakeService::default()));
        let id = worker.submit(Job::Analyze {
            text: "The cat sees the cat.".to_string(),
        });

        let event = worker.recv_timeout(WAIT).unwrap();
        assert_eq!(event.id, id);
        assert!(matches!(event.outcome, Outcome::Analysis(Ok(_))));
    }

    #[test]
    fn test_tree_job_carries_sentence_back() {
        let worker = Worker::new(Arc::new(FakeService::default()));
        worker.submit(Job::Tree {
            sentence: " How are you?".to_string(),
        });

        match worker.recv_timeout(WAIT).unwrap().outcome {
            Outcome::Tree { sentence, result } => {
                assert_eq!(sentence, " How are you?");
                assert!(result.unwrap().is_png());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_overlapping_jobs_get_distinct_ids() {
        let worker = Worker::new(Arc::new(FakeService::default()));
        let first = worker.submit(Job::Analyze { text: "a.".to_string() });
        let second = worker.submit(Job::Analyze { text: "b.".to_string() });
        assert_ne!(first, second);

        let mut seen = vec![
            worker.recv_timeout(WAIT).unwrap().id,
            worker.recv_timeout(WAIT).unwrap().id,
        ];
        seen.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_try_recv_is_empty_without_jobs() {
        let worker = Worker::new(Arc::new(FakeService::default()));
        assert!(worker.try_recv().is_none());
    }
}
