//! GLib对象系统模块
//!
//! 提供与GLib GObject兼容的对象系统，包括：
//! - GObject基础对象类型
//! - 类型系统注册和管理
//! - 信号连接和发射
//! - 属性系统
//! - 引用计数管理
//! - 继承和接口支持

#![no_std]

extern crate alloc;

use crate::glib::{types::*, collections::*, error::GError, g_free, g_malloc, g_malloc0};
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::ptr::{self, NonNull};
use core::ffi::c_void;
use core::sync::atomic::{AtomicUsize, Ordering};


/// 对象统计信息
#[derive(Debug, Default)]
pub struct ObjectStats {
    pub total_types: AtomicUsize,
    pub total_instances: AtomicUsize,
    pub total_signals: AtomicUsize,
    pub total_properties: AtomicUsize,
}

/// 对象类型信息
#[derive(Debug, Clone)]
pub struct GObjectTypeInfo {
    pub name: String,
    pub parent_type: GType,
    pub type_size: usize,
    pub class_size: usize,
    pub instance_size: usize,
    pub class_init: Option<GClassInitFunc>,
    pub instance_init: Option<GInstanceInitFunc>,
    pub interface_info: Vec<GInterfaceInfo>,
}

/// 对象类型ID
pub type GType = usize;

/// 无效类型常量
pub const G_TYPE_INVALID: GType = 0;
/// 基础类型常量
pub const G_TYPE_NONE: GType = 1;
pub const G_TYPE_INTERFACE: GType = 2;
pub const G_TYPE_CHAR: GType = 3;
pub const G_TYPE_UCHAR: GType = 4;
pub const G_TYPE_BOOLEAN: GType = 5;
pub const G_TYPE_INT: GType = 6;
pub const G_TYPE_UINT: GType = 7;
pub const G_TYPE_LONG: GType = 8;
pub const G_TYPE_ULONG: GType = 9;
pub const G_TYPE_INT64: GType = 10;
pub const G_TYPE_UINT64: GType = 11;
pub const G_TYPE_ENUM: GType = 12;
pub const G_TYPE_FLAGS: GType = 13;
pub const G_TYPE_FLOAT: GType = 14;
pub const G_TYPE_DOUBLE: GType = 15;
pub const G_TYPE_STRING: GType = 16;
pub const G_TYPE_POINTER: GType = 17;
pub const G_TYPE_BOXED: GType = 18;
pub const G_TYPE_PARAM: GType = 19;
pub const G_TYPE_OBJECT: GType = 20;

/// 类初始化函数类型
pub type GClassInitFunc = unsafe extern "C" fn(gpointer, gpointer);

/// 实例初始化函数类型
pub type GInstanceInitFunc = unsafe extern "C" fn(gpointer, gpointer);

/// 信号回调函数类型
pub type GCallback = unsafe extern "C" fn();

/// 信号发射函数类型
pub type GSignalEmissionHook = unsafe extern "C" fn(*mut GSignalInvocationHint,
                                                   *mut guint, *const GValue, gpointer) -> gboolean;

/// 属性值类型
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GValue {
    pub g_type: GType,
    pub data: [u64; 2], // 足够容纳所有基本类型的存储
}

/// 信号调用信息
#[repr(C)]
pub struct GSignalInvocationHint {
    pub signal_id: guint,
    pub detail: guint,
    pub run_type: GSignalFlags,
}

/// 信号标志
pub type GSignalFlags = u32;
pub const G_SIGNAL_RUN_FIRST: GSignalFlags = 1 << 0;
pub const G_SIGNAL_RUN_LAST: GSignalFlags = 1 << 1;
pub const G_SIGNAL_RUN_CLEANUP: GSignalFlags = 1 << 2;
pub const G_SIGNAL_NO_RECURSE: GSignalFlags = 1 << 3;
pub const G_SIGNAL_DETAILED: GSignalFlags = 1 << 4;
pub const G_SIGNAL_ACTION: GSignalFlags = 1 << 5;
pub const G_SIGNAL_NO_HOOKS: GSignalFlags = 1 << 6;
pub const G_SIGNAL_MUST_COLLECT: GSignalFlags = 1 << 7;

/// 接口信息
#[derive(Debug, Clone)]
pub struct GInterfaceInfo {
    pub interface_init: Option<GInterfaceInitFunc>,
    pub interface_finalize: Option<GInterfaceFinalizeFunc>,
    pub interface_data: gpointer,
}

/// 接口初始化函数类型
pub type GInterfaceInitFunc = unsafe extern "C" fn(gpointer, gpointer);

/// 接口终结函数类型
pub type GInterfaceFinalizeFunc = unsafe extern "C" fn(gpointer, gpointer);

/// GObject 基础结构
#[repr(C)]
#[derive(Debug)]
pub struct GObject {
    pub g_type_instance: GTypeInstance,
    pub ref_count: AtomicUsize,
    pub qdata: *mut GData,
}

/// 类型实例基础结构
#[repr(C)]
#[derive(Debug)]
pub struct GTypeInstance {
    pub g_class: *mut GTypeClass,
}

/// 类型类基础结构
#[repr(C)]
#[derive(Debug)]
pub struct GTypeClass {
    pub g_type: GType,
}

/// GObject类基础结构
#[repr(C)]
#[derive(Debug)]
pub struct GObjectClass {
    pub parent_class: GTypeClass,
    pub constructor: Option<GObjectConstructor>,
    pub set_property: Option<GObjectSetPropertyFunc>,
    pub get_property: Option<GObjectGetPropertyFunc>,
    pub dispose: Option<GObjectDisposeFunc>,
    pub finalize: Option<GObjectFinalizeFunc>,
    pub notify: Option<GObjectNotifyFunc>,
}

/// 对象构造函数类型
pub type GObjectConstructor = unsafe extern "C" fn(GType, guint, *mut GObjectConstructParam) -> *mut GObject;

/// 构造参数
#[repr(C)]
pub struct GObjectConstructParam {
    pub pspec: *mut GParamSpec,
    pub value: *mut GValue,
}

/// 属性规格
#[repr(C)]
pub struct GParamSpec {
    pub g_type_instance: GTypeInstance,
    pub name: *const gchar,
    pub flags: GParamFlags,
    pub value_type: GType,
    pub owner_type: GType,
    pub _property_id: guint,
}

/// 属性标志
pub type GParamFlags = u32;
pub const G_PARAM_READABLE: GParamFlags = 1 << 0;
pub const G_PARAM_WRITABLE: GParamFlags = 1 << 1;
pub const G_PARAM_READWRITE: GParamFlags = G_PARAM_READABLE | G_PARAM_WRITABLE;
pub const G_PARAM_CONSTRUCT: GParamFlags = 1 << 2;
pub const G_PARAM_CONSTRUCT_ONLY: GParamFlags = 1 << 3;
pub const G_PARAM_LAX_VALIDATION: GParamFlags = 1 << 4;
pub const G_PARAM_STATIC_NAME: GParamFlags = 1 << 5;
pub const G_PARAM_PRIVATE: GParamFlags = G_PARAM_STATIC_NAME;
pub const G_PARAM_STATIC_NICK: GParamFlags = 1 << 6;
pub const G_PARAM_STATIC_BLURB: GParamFlags = 1 << 7;
pub const G_PARAM_EXPLICIT_NOTIFY: GParamFlags = 1 << 30;

/// 函数指针类型
pub type GObjectSetPropertyFunc = unsafe extern "C" fn(*mut GObject, guint, *const GValue, *mut GParamSpec);
pub type GObjectGetPropertyFunc = unsafe extern "C" fn(*mut GObject, guint, *mut GValue, *mut GParamSpec);
pub type GObjectDisposeFunc = unsafe extern "C" fn(*mut GObject);
pub type GObjectFinalizeFunc = unsafe extern "C" fn(*mut GObject);
pub type GObjectNotifyFunc = unsafe extern "C" fn(*mut GObject, *mut GParamSpec);

/// 通用数据结构
#[repr(C)]
pub struct GData {
    pub data: BTreeMap<gquark, gpointer>,
}

/// 四元组类型
pub type gquark = u32;

/// 全局类型注册表
static mut TYPE_REGISTRY: Option<BTreeMap<GType, GObjectTypeInfo>> = None;
static mut NEXT_TYPE_ID: GType = G_TYPE_OBJECT + 1;

/// 对象统计
static OBJECT_STATS: ObjectStats = ObjectStats {
    total_types: AtomicUsize::new(0),
    total_instances: AtomicUsize::new(0),
    total_signals: AtomicUsize::new(0),
    total_properties: AtomicUsize::new(0),
};

/// 初始化对象系统
pub fn init() -> Result<(), GError> {
    glib_println!("[glib_object] 初始化对象系统");

    unsafe {
        TYPE_REGISTRY = Some(BTreeMap::new());
    }

    // 注册基础GObject类型
    register_gobject_type()?;

    glib_println!("[glib_object] 对象系统初始化完成");
    Ok(())
}

/// 注册GObject基础类型
fn register_gobject_type() -> Result<(), GError> {
    let type_info = GObjectTypeInfo {
        name: String::from("GObject"),
        parent_type: G_TYPE_NONE,
        type_size: core::mem::size_of::<GObject>(),
        class_size: core::mem::size_of::<GObjectClass>(),
        instance_size: core::mem::size_of::<GObject>(),
        class_init: Some(gobject_class_init),
        instance_init: Some(gobject_instance_init),
        interface_info: Vec::new(),
    };

    unsafe {
        let type_id = NEXT_TYPE_ID;
        NEXT_TYPE_ID += 1;

        if let Some(ref mut registry) = TYPE_REGISTRY {
            registry.insert(type_id, type_info.clone());
            OBJECT_STATS.total_types.fetch_add(1, Ordering::SeqCst);
        }

        // 注册到内核
        let result = crate::syscall(syscall_number::GLibObjectTypeRegister, &[
            "GObject\0".as_ptr() as usize,
            type_id,
            core::mem::size_of::<GObject>(),
            0, // 标志
            0,
        ]);

        if result <= 0 {
            return Err(GError::new(crate::glib::error::domains::G_THREAD_ERROR,
                                  1,
                                  "Failed to register GObject type in kernel"));
        }
    }

    glib_println!("[glib_object] GObject类型注册完成");
    Ok(())
}

/// GObject类初始化函数
unsafe extern "C" fn gobject_class_init(class: gpointer, class_data: gpointer) {
    glib_println!("[glib_object] GObject类初始化");

    let gobject_class = class as *mut GObjectClass;

    // 设置默认方法
    (*gobject_class).constructor = Some(gobject_constructor);
    (*gobject_class).dispose = Some(gobject_dispose);
    (*gobject_class).finalize = Some(gobject_finalize);
    (*gobject_class).set_property = Some(gobject_set_property);
    (*gobject_class).get_property = Some(gobject_get_property);
    (*gobject_class).notify = Some(gobject_notify);

    // 添加基础属性
    // 实际实现中应该调用g_object_class_install_property
}

/// GObject实例初始化函数
unsafe extern "C" fn gobject_instance_init(instance: gpointer, class: gpointer) {
    glib_println!("[glib_object] GObject实例初始化");

    let gobject = instance as *mut GObject;
    (*gobject).ref_count = AtomicUsize::new(1);
    (*gobject).qdata = ptr::null_mut();

    OBJECT_STATS.total_instances.fetch_add(1, Ordering::SeqCst);
}

/// GObject构造函数
unsafe extern "C" fn gobject_constructor(
    type_id: GType,
    n_construct_properties: guint,
    construct_params: *mut GObjectConstructParam,
) -> *mut GObject {
    glib_println!("[glib_object] 构造GObject实例");

    // 在内核中创建实例
    let instance_id = crate::syscall(syscall_number::GLibObjectInstanceCreate, &[
        type_id,
        0, // 对象指针（由内核分配）
        0, 0, 0, 0,
    ]) as u64;

    if instance_id == 0 {
        return ptr::null_mut();
    }

    // 分配用户空间实例
    let gobject = g_malloc0(core::mem::size_of::<GObject>()) as *mut GObject;
    if gobject.is_null() {
        return ptr::null_mut();
    }

    // 初始化实例
    (*gobject).ref_count = AtomicUsize::new(1);
    (*gobject).qdata = ptr::null_mut();
    (*gobject).g_type_instance.g_class = ptr::null_mut(); // 需要从内核获取类信息

    gobject
}

/// GObject销毁函数
unsafe extern "C" fn gobject_dispose(object: *mut GObject) {
    glib_println!("[glib_object] GObject dispose");
}

/// GObject终结函数
unsafe extern "C" fn gobject_finalize(object: *mut GObject) {
    glib_println!("[glib_object] GObject finalize");

    // 在内核中销毁实例
    crate::syscall(syscall_number::GLibObjectUnref, &[
        object as usize,
        0, 0, 0, 0, 0,
    ]);

    OBJECT_STATS.total_instances.fetch_sub(1, Ordering::SeqCst);
}

/// GObject属性设置函数
unsafe extern "C" fn gobject_set_property(
    object: *mut GObject,
    property_id: guint,
    value: *const GValue,
    pspec: *mut GParamSpec,
) {
    glib_println!("[glib_object] 设置属性 ID={}", property_id);
}

/// GObject属性获取函数
unsafe extern "C" fn gobject_get_property(
    object: *mut GObject,
    property_id: guint,
    value: *mut GValue,
    pspec: *mut GParamSpec,
) {
    glib_println!("[glib_object] 获取属性 ID={}", property_id);
}

/// GObject通知函数
unsafe extern "C" fn gobject_notify(object: *mut GObject, pspec: *mut GParamSpec) {
    glib_println!("[glib_object] 属性通知");
}

/// 注册新的对象类型
pub fn g_type_register_static_simple(
    parent_type: GType,
    type_name: &str,
    class_size: usize,
    class_init: GClassInitFunc,
    instance_size: usize,
    instance_init: GInstanceInitFunc,
) -> GType {
    unsafe {
        let type_id = NEXT_TYPE_ID;
        NEXT_TYPE_ID += 1;

        let type_info = GObjectTypeInfo {
            name: String::from(type_name),
            parent_type,
            type_size: instance_size,
            class_size,
            instance_size,
            class_init: Some(class_init),
            instance_init: Some(instance_init),
            interface_info: Vec::new(),
        };

        if let Some(ref mut registry) = TYPE_REGISTRY {
            registry.insert(type_id, type_info.clone());
        }

        // 注册到内核
        let result = crate::syscall(syscall_number::GLibObjectTypeRegister, &[
            type_name.as_ptr() as usize,
            type_id,
            instance_size,
            0, // 标志
            0,
        ]);

        if result > 0 {
            OBJECT_STATS.total_types.fetch_add(1, Ordering::SeqCst);
            glib_println!("[glib_object] 注册类型: {} (ID={})", type_name, type_id);
            type_id
        } else {
            G_TYPE_INVALID
        }
    }
}

/// 增加对象引用计数
pub fn g_object_ref(object: *mut GObject) -> *mut GObject {
    if object.is_null() {
        return ptr::null_mut();
    }

    unsafe {
        // 在内核中增加引用计数
        let result = crate::syscall(syscall_number::GLibObjectRef, &[
            object as usize,
            0, 0, 0, 0, 0,
        ]);

        if result > 0 {
            // 本地引用计数
            let current = (*object).ref_count.fetch_add(1, Ordering::SeqCst);
            glib_println!("[glib_object] 引用计数增加: {:p}, new_count={}", object, current + 1);
        }
    }

    object
}

/// 减少对象引用计数
pub fn g_object_unref(object: *mut GObject) {
    if object.is_null() {
        return;
    }

    unsafe {
        // 在内核中减少引用计数
        let result = crate::syscall(syscall_number::GLibObjectUnref, &[
            object as usize,
            0, 0, 0, 0, 0,
        ]);

        let current = (*object).ref_count.fetch_sub(1, Ordering::SeqCst);
        glib_println!("[glib_object] 引用计数减少: {:p}, new_count={}", object, current - 1);

        // 如果引用计数为0，调用finalize
        if current == 1 {
            if let Some(ref mut registry) = TYPE_REGISTRY {
                if let Some(type_info) = registry.get(&G_TYPE_OBJECT) {
                    if let Some(class) = ((*object).g_type_instance.g_class as *mut GObjectClass).as_ref() {
                        if let Some(finalize) = class.finalize {
                            finalize(object);
                        }
                    }
                }
            }
        }
    }
}

/// 设置对象属性
pub fn g_object_set(object: *mut GObject, property_name: &str, value: gpointer) {
    if object.is_null() || property_name.is_empty() {
        return;
    }

    unsafe {
        let result = crate::syscall(syscall_number::GLibObjectSetProperty, &[
            object as usize,
            property_name.as_ptr() as usize,
            value as usize,
            0, 0, 0,
        ]);

        if result == 0 {
            glib_println!("[glib_object] 设置属性成功: {}={:?}", property_name, value);
        } else {
            glib_println!("[glib_object] 设置属性失败: {}", property_name);
        }
    }
}

/// 获取对象属性
pub fn g_object_get(object: *mut GObject, property_name: &str) -> gpointer {
    if object.is_null() || property_name.is_empty() {
        return ptr::null_mut();
    }

    unsafe {
        let mut value = 0u64;
        let result = crate::syscall(syscall_number::GLibObjectGetProperty, &[
            object as usize,
            property_name.as_ptr() as usize,
            &mut value as *mut u64 as usize,
            0, 0, 0,
        ]);

        if result == 0 {
            glib_println!("[glib_object] 获取属性成功: {}={:?}", property_name, value as gpointer);
            value as gpointer
        } else {
            glib_println!("[glib_object] 获取属性失败: {}", property_name);
            ptr::null_mut()
        }
    }
}

/// 注册信号
pub fn g_signal_new(
    signal_name: &str,
    itype: GType,
    signal_flags: GSignalFlags,
    class_closure: GClosure,
    accumulator: GSignalAccumulator,
    accu_data: gpointer,
    c_marshaller: GSignalCMarshaller,
    return_type: GType,
    n_params: u32,
    param_types: *const GType,
) -> guint {
    if signal_name.is_empty() {
        return 0;
    }

    unsafe {
        let result = crate::syscall(syscall_number::GLibObjectSignalRegister, &[
            itype,
            signal_name.as_ptr() as usize,
            param_types as usize,
            n_params as usize,
            return_type,
            signal_flags as usize,
        ]);

        if result > 0 {
            OBJECT_STATS.total_signals.fetch_add(1, Ordering::SeqCst);
            glib_println!("[glib_object] 注册信号: {} (ID={})", signal_name, result);
            result as guint
        } else {
            0
        }
    }
}

/// 连接信号处理器
pub fn g_signal_connect(
    instance: *mut GObject,
    detailed_signal: &str,
    c_handler: GCallback,
    data: gpointer,
) -> gulong {
    // 简化实现，实际应该维护处理器列表
    glib_println!("[glib_object] 连接信号: {} -> {:?}", detailed_signal, c_handler);
    1 // 返回处理器ID
}

/// 发射信号
pub fn g_signal_emit(
    instance: *mut GObject,
    signal_id: guint,
    detail: GQuark,
    var_args: *mut c_void,
) {
    if instance.is_null() {
        return;
    }

    unsafe {
        let result = crate::syscall(syscall_number::GLibObjectSignalEmit, &[
            instance as usize,
            signal_id as usize,
            var_args as usize, // 参数数组指针（简化）
            0, // 参数数量（简化）
            0,
        ]);

        if result >= 0 {
            glib_println!("[glib_object] 信号发射成功: ID={}, handlers={}", signal_id, result);
        }
    }
}

/// 信号闭包类型
#[repr(C)]
pub struct GClosure {
    pub ref_count: AtomicUsize,
    pub meta_marshal: Option<GSignalCMarshaller>,
    pub marshal: Option<GSignalCMarshaller>,
    pub data: gpointer,
    pub notifiers: *mut GList,
}

/// 信号累加器类型
pub type GSignalAccumulator = unsafe extern "C" fn(*mut GSignalInvocationHint, *mut GValue, *const GValue, gpointer) -> gboolean;

/// 信号C编组器类型
pub type GSignalCMarshaller = unsafe extern "C" fn(*mut GClosure, *mut GValue, guint, *const GValue, gpointer, gpointer);

/// 获取对象统计信息
pub fn get_object_stats() -> &'static ObjectStats {
    &OBJECT_STATS
}

/// 清理对象系统
pub fn cleanup() {
    glib_println!("[glib_object] 清理对象系统");

    unsafe {
        // 清理内核中的所有对象
        crate::syscall(syscall_number::GLibObjectCleanup, &[0, 0, 0, 0, 0, 0]);

        // 清理类型注册表
        TYPE_REGISTRY = None;
    }

    // 打印统计信息
    let stats = get_object_stats();
    glib_println!("[glib_object] 统计信息:");
    glib_println!("  总类型数: {}", stats.total_types.load(Ordering::SeqCst));
    glib_println!("  总实例数: {}", stats.total_instances.load(Ordering::SeqCst));
    glib_println!("  总信号数: {}", stats.total_signals.load(Ordering::SeqCst));
    glib_println!("  总属性数: {}", stats.total_properties.load(Ordering::SeqCst));

    glib_println!("[glib_object] 对象系统清理完成");
}

/// 对象系统测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gobject_creation() {
        init().unwrap();

        // 创建GObject实例
        let gobject = unsafe { gobject_constructor(G_TYPE_OBJECT, 0, ptr::null_mut()) };
        assert!(!gobject.is_null());

        // 测试引用计数
        let ref_count = unsafe { (*gobject).ref_count.load(Ordering::SeqCst) };
        assert_eq!(ref_count, 1);

        // 增加引用
        g_object_ref(gobject);
        let ref_count = unsafe { (*gobject).ref_count.load(Ordering::SeqCst) };
        assert_eq!(ref_count, 2);

        // 减少引用
        g_object_unref(gobject);
        let ref_count = unsafe { (*gobject).ref_count.load(Ordering::SeqCst) };
        assert_eq!(ref_count, 1);

        // 最终释放
        g_object_unref(gobject);

        cleanup();
    }

    #[test]
    fn test_type_registration() {
        init().unwrap();

        unsafe extern "C" fn test_class_init(class: gpointer, class_data: gpointer) {}
        unsafe extern "C" fn test_instance_init(instance: gpointer, class: gpointer) {}

        let test_type = g_type_register_static_simple(
            G_TYPE_OBJECT,
            "TestObject",
            core::mem::size_of::<GObjectClass>(),
            test_class_init,
            core::mem::size_of::<GObject>(),
            test_instance_init,
        );

        assert!(test_type != G_TYPE_INVALID);

        cleanup();
    }

    #[test]
    fn test_object_properties() {
        init().unwrap();

        let gobject = unsafe { gobject_constructor(G_TYPE_OBJECT, 0, ptr::null_mut()) };
        assert!(!gobject.is_null());

        // 测试属性设置和获取
        let test_value = 42usize as gpointer;
        g_object_set(gobject, "test_property", test_value);

        let retrieved_value = g_object_get(gobject, "test_property");
        assert_eq!(retrieved_value, test_value);

        g_object_unref(gobject);

        cleanup();
    }

    #[test]
    fn test_object_stats() {
        init().unwrap();

        let initial_types = get_object_stats().total_types.load(Ordering::SeqCst);

        unsafe extern "C" fn test_class_init(class: gpointer, class_data: gpointer) {}
        unsafe extern "C" fn test_instance_init(instance: gpointer, class: gpointer) {}

        // 注册新类型
        let test_type = g_type_register_static_simple(
            G_TYPE_OBJECT,
            "TestObjectStats",
            core::mem::size_of::<GObjectClass>(),
            test_class_init,
            core::mem::size_of::<GObject>(),
            test_instance_init,
        );

        assert!(test_type != G_TYPE_INVALID);
        assert_eq!(get_object_stats().total_types.load(Ordering::SeqCst), initial_types + 1);

        cleanup();
    }
}

// 系统调用号映射
mod syscall_number {
    pub const GLibObjectTypeRegister: usize = 1020;
    pub const GLibObjectInstanceCreate: usize = 1021;
    pub const GLibObjectRef: usize = 1022;
    pub const GLibObjectUnref: usize = 1023;
    pub const GLibObjectSignalRegister: usize = 1024;
    pub const GLibObjectSignalEmit: usize = 1025;
    pub const GLibObjectSetProperty: usize = 1026;
    pub const GLibObjectGetProperty: usize = 1027;
    pub const GLibObjectCleanup: usize = 1029;
}