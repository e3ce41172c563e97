//! 端点的字节输入/输出边界
//!
//! 发送端从一个有序字节源读取，接收端向一个有序字节汇写入。
//! 文件处理留给外层二进制；库内只提供内存实现。

use std::sync::{Arc, Mutex};

/// 有序字节源（角色 A 的输入）。
pub trait ByteSource: Send {
    /// 读取至多 `max` 字节；返回空向量表示输入已耗尽。
    fn read_chunk(&mut self, max: usize) -> Vec<u8>;
}

/// 有序字节汇（角色 B 的输出）。
pub trait ByteSink: Send {
    fn write_all(&mut self, bytes: &[u8]);
}

/// 内存字节源。
pub struct MemSource {
    data: Vec<u8>,
    pos: usize,
}

impl MemSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for MemSource {
    fn read_chunk(&mut self, max: usize) -> Vec<u8> {
        let end = (self.pos + max).min(self.data.len());
        let chunk = self.data[self.pos..end].to_vec();
        self.pos = end;
        chunk
    }
}

/// 内存字节汇；通过共享句柄在仿真结束后取回已交付的字节。
pub struct MemSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemSink {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 交付字节的共享句柄。
    pub fn handle(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.buf)
    }
}

impl Default for MemSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSink for MemSink {
    fn write_all(&mut self, bytes: &[u8]) {
        self.buf.lock().expect("sink lock").extend_from_slice(bytes);
    }
}
