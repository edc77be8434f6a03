// crates/rz_remap/src/parallel.rs

//! 按实体的并行映射
//!
//! 每个工作线程只写入自身实体的结果槽，输出顺序与输入一致。
//! 规模低于阈值时退化为串行循环。

use crate::config::ParallelPolicy;
use rayon::prelude::*;
use rz_foundation::RzResult;

/// 对实体编号逐一求值，遇到错误即返回
pub fn try_map_entities<T, F>(ids: &[usize], policy: ParallelPolicy, f: F) -> RzResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> RzResult<T> + Sync + Send,
{
    if policy.use_parallel(ids.len()) {
        ids.par_iter().map(|&id| f(id)).collect()
    } else {
        ids.iter().map(|&id| f(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rz_foundation::RzError;

    #[test]
    fn test_parallel_matches_serial() {
        let ids: Vec<usize> = (0..5000).collect();
        let par = ParallelPolicy {
            enabled: true,
            threshold: 100,
        };
        let a = try_map_entities(&ids, par, |i| Ok(i * i)).unwrap();
        let b = try_map_entities(&ids, ParallelPolicy::SERIAL, |i| Ok(i * i)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_propagates() {
        let ids: Vec<usize> = (0..2000).collect();
        let par = ParallelPolicy {
            enabled: true,
            threshold: 1,
        };
        let result = try_map_entities(&ids, par, |i| {
            if i == 1234 {
                Err(RzError::precondition("测试"))
            } else {
                Ok(i)
            }
        });
        assert!(result.is_err());
    }
}
