//! 告警发送
//!
//! 对引擎而言发送是单向的，不关心投递结果。

use std::sync::{Arc, Mutex};

use tracing::warn;

/// 告警发送特征
pub trait SendAlertService: Send + Sync {
    /// 发送告警消息
    fn send(&self, message: &str);
}

impl<T: SendAlertService + ?Sized> SendAlertService for Arc<T> {
    fn send(&self, message: &str) {
        (**self).send(message)
    }
}

/// 通过日志输出告警
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertService;

impl SendAlertService for LogAlertService {
    fn send(&self, message: &str) {
        warn!(target: "vitals::alert", "{}", message);
    }
}

/// 内存告警记录，供轮询方或测试读取
#[derive(Debug, Default)]
pub struct MemoryAlertService {
    messages: Mutex<Vec<String>>,
}

impl MemoryAlertService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已发送消息的快照
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空并返回已记录的消息
    pub fn clear(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl SendAlertService for MemoryAlertService {
    fn send(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
