/// A step taken by the simplifier. Each variant names a rule that rewrote a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Every argument is constant, so the node was replaced by its value.
    ConstantFold,

    /// The arguments of a commutative operation were put in canonical order.
    ///
    /// `(+ v1 v0) = (+ v0 v1)`
    Reorder,

    /// `(+ 0 a) = a`
    AddZero,

    /// `(+ a a) = (* 2 a)`
    AddSelf,

    /// `(+ -3 a) = (- a 3)`
    AddNegative,

    /// Two constants of nested additions and subtractions were combined.
    ///
    /// `(+ 1 (+ 2 a)) = (+ 3 a)`
    CombineConstants,

    /// A constant was moved up to the outermost of two nested additions.
    ///
    /// `(+ a (+ 1 b)) = (+ 1 (+ a b))`
    HoistConstant,

    /// `(- a a) = 0`
    SubtractSelf,

    /// `(- a 0) = a`
    SubtractZero,

    /// `(- a -3) = (+ 3 a)`
    SubtractNegative,

    /// `(- 0 (- a b)) = (- b a)`
    NegateDifference,

    /// `(- 0 (* 3 a)) = (* -3 a)`
    NegateProduct,

    /// `(* 0 a) = 0`
    MultiplyZero,

    /// `(* 1 a) = a`
    MultiplyOne,

    /// A constant factor was distributed over an addition or subtraction.
    ///
    /// `(* 2 (+ a b)) = (+ (* 2 a) (* 2 b))`
    Distribute,

    /// `(/ a 1) = a`
    DivideOne,

    /// `(/ a -1) = (- 0 a)`
    DivideNegativeOne,

    /// `(> a b) = (< b a)`
    SwapComparison,

    /// A comparison of a node with itself.
    ///
    /// `(<= a a) = true`
    Reflexive,

    /// A negation was replaced by an equivalent operation.
    ///
    /// `(false? (< a b)) = (<= b a)`
    Negate,

    /// `(false? (or a b)) = (and (false? a) (false? b))`
    DeMorgan,

    /// A boolean connective with a constant argument.
    ///
    /// `(and true a) = a`
    BooleanIdentity,

    /// `(and a a) = a`
    Idempotent,

    /// The facts that follow from the arguments contradict each other, so the result is constant.
    ///
    /// `(and (= a b) (!= a b)) = false`
    Contradiction,

    /// The result is the same whatever the arguments evaluate to.
    ///
    /// `(or (< a b) (<= b a)) = true`
    Tautology,

    /// One argument implies the other, so the other was dropped.
    ///
    /// `(and (< a b) (<= a b)) = (< a b)`
    Redundant,

    /// The node was replaced by a smaller node that holds in exactly the same cases.
    ///
    /// `(and (<= a b) (<= b a)) = (= a b)`
    Equivalent,

    /// `(if c a a) = a`
    EqualBranches,

    /// `(if true a b) = a`
    ConstantCondition,

    /// `(if (false? c) a b) = (if c b a)`
    NegatedCondition,

    /// Facts known to hold inside a branch were substituted into it.
    ///
    /// `(if (< a b) (<= a b) c) = (if (< a b) true c)`
    SubstituteFacts,

    /// `(or-else a (or-else b (or-else a c))) = (or-else a (or-else b c))`
    CollapseDuplicates,

    /// A higher-order operation was applied to an empty list.
    ///
    /// `(map f []) = []`
    EmptyList,
}
