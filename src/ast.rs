use crate::catalog::CompiledOp;
use serde_json::Number;

/// 过滤条件表达式树, 由语法分析器构建, 由 `QueryCompiler` 渲染
///
/// 语法分析器产生的 `And` / `Or` 节点至少有两个子节点; 单个子项直接折叠为其自身.
/// 括号只影响树的形状, 不单独保留节点.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// 逻辑或运算 (OR)
    Or(Vec<Condition>),
    /// 逻辑与运算 (AND)
    And(Vec<Condition>),
    /// 逻辑非运算 (NOT)
    Not(Box<Condition>),
    /// 对单个通道的比较, 这是条件的叶子节点
    Predicate(Predicate),
}

/// 例如：`CHANNEL_1 <= 1`, `timestamp is null`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// 通道名, 字段路径在渲染时解析
    pub channel: String,
    pub op: CompiledOp,
    pub operand: Operand,
}

/// 比较的右操作数
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// 一元运算符 (`is null` / `is not null`)
    Null,
    /// 另一个通道, 渲染为其字段路径字符串
    Channel(String),
    /// 已去掉引号的字符串
    String(String),
    Number(Number),
}
